// Service status operation

use async_trait::async_trait;
use hyper::StatusCode;
use serde::Serialize;

use crate::error::HandlerError;
use crate::handler::{Handler, Outcome};
use crate::http::{RequestContext, ResponseWriter};

#[derive(Debug, Serialize)]
struct StatusBody<'a> {
    service: &'static str,
    version: &'a str,
    status: &'static str,
    context: &'a str,
}

/// Reports that the web layer is up, with version and mounted context.
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    version: String,
}

impl ServiceStatus {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

#[async_trait]
impl Handler for ServiceStatus {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        let body = StatusBody {
            service: "restabuild",
            version: &self.version,
            status: "running",
            context: ctx.context_path(),
        };
        resp.json(StatusCode::OK, &body)?;
        Ok(Outcome::Claimed)
    }
}
