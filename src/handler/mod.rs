//! Request handler module
//!
//! Every concern of the web server is a [`Handler`]: given a request and the
//! response under construction it either claims the request (it wrote the
//! response) or declines and leaves the response untouched apart from
//! additive headers. A [`Chain`] runs handlers in order and is a handler
//! itself, so chains nest.

mod chain;
mod context;
mod cors;
mod index;
mod redirect;
mod request_log;
pub mod router;
pub mod static_files;

pub use chain::{evaluate, Chain};
pub use context::{ContextPath, ContextRouter};
pub use cors::CorsHeaders;
pub use index::IndexPage;
pub use redirect::RootRedirect;
pub use request_log::RequestLogger;
pub use static_files::{ResourceSet, StaticFiles};

use crate::error::HandlerError;
use crate::http::{RequestContext, ResponseWriter};
use async_trait::async_trait;

/// Result of offering a request to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler produced the response; evaluation stops.
    Claimed,
    /// The handler did not handle the request; the next one is tried.
    Declined,
}

impl Outcome {
    pub const fn is_claimed(self) -> bool {
        matches!(self, Self::Claimed)
    }
}

/// A unit of request handling with a claim/decline contract.
///
/// Implementations hold only configuration fixed at construction. A handler
/// that declines must not write the body.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError>;
}
