//! Logs each request as it enters the top-level chain.

use super::{Handler, Outcome};
use crate::error::HandlerError;
use crate::http::{RequestContext, ResponseWriter};
use crate::logger::Logger;
use async_trait::async_trait;

/// Writes `[Request] METHOD URI VERSION` at info level and declines.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    logger: Logger,
    show_headers: bool,
}

impl RequestLogger {
    pub const fn new(logger: Logger, show_headers: bool) -> Self {
        Self {
            logger,
            show_headers,
        }
    }
}

#[async_trait]
impl Handler for RequestLogger {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        _resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        self.logger.info(&format!(
            "[Request] {} {} {:?}",
            ctx.method(),
            ctx.uri(),
            ctx.version()
        ));
        if self.show_headers {
            for (name, value) in ctx.headers() {
                self.logger.info(&format!(
                    "[Header] {name}: {}",
                    value.to_str().unwrap_or("<binary>")
                ));
            }
        } else {
            self.logger
                .debug(&format!("[Headers] Count: {}", ctx.headers().len()));
        }
        Ok(Outcome::Declined)
    }
}
