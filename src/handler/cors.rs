//! Allow-all CORS headers.

use super::{Handler, Outcome};
use crate::error::HandlerError;
use crate::http::{RequestContext, ResponseWriter};
use async_trait::async_trait;
use hyper::header::{self, HeaderName};

const CORS_HEADERS: [(HeaderName, &str); 5] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "origin, content-type, accept, authorization",
    ),
    (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET, POST, PUT, DELETE, OPTIONS, HEAD",
    ),
    (header::ACCESS_CONTROL_MAX_AGE, "86400"),
];

/// Adds the CORS header set to every response passing through. Never claims.
#[derive(Debug, Default, Clone, Copy)]
pub struct CorsHeaders;

#[async_trait]
impl Handler for CorsHeaders {
    async fn handle(
        &self,
        _ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        for (name, value) in CORS_HEADERS {
            resp.append_header(name, value)?;
        }
        Ok(Outcome::Declined)
    }
}
