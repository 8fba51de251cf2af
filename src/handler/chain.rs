//! Ordered, short-circuiting handler chain.

use super::{Handler, Outcome};
use crate::error::HandlerError;
use crate::http::{RequestContext, ResponseWriter};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Offer the request to each handler in order until one claims it.
///
/// Handler errors propagate immediately; later handlers are not run.
pub async fn evaluate(
    handlers: &[Arc<dyn Handler>],
    ctx: &RequestContext<'_>,
    resp: &mut ResponseWriter,
) -> Result<Outcome, HandlerError> {
    for handler in handlers {
        if handler.handle(ctx, resp).await?.is_claimed() {
            return Ok(Outcome::Claimed);
        }
    }
    Ok(Outcome::Declined)
}

/// Handlers evaluated left to right. Order is fixed once built.
#[derive(Clone, Default)]
pub struct Chain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, handler: impl Handler + 'static) -> Self {
        self.with_shared(Arc::new(handler))
    }

    /// Append a handler that is also referenced elsewhere.
    #[must_use]
    pub fn with_shared(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[async_trait]
impl Handler for Chain {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        evaluate(&self.handlers, ctx, resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::{request, Recording};
    use hyper::Method;

    struct Failing;

    #[async_trait]
    impl Handler for Failing {
        async fn handle(
            &self,
            _ctx: &RequestContext<'_>,
            _resp: &mut ResponseWriter,
        ) -> Result<Outcome, HandlerError> {
            Err(HandlerError::Delegate("queue unavailable".into()))
        }
    }

    #[tokio::test]
    async fn test_first_claim_short_circuits() {
        let first = Arc::new(Recording::claiming());
        let second = Arc::new(Recording::claiming());
        let third = Arc::new(Recording::declining());
        let chain = Chain::new()
            .with_shared(first.clone())
            .with_shared(second.clone())
            .with_shared(third.clone());

        let req = request(Method::GET, "/anything");
        let mut resp = ResponseWriter::new();
        let outcome = chain.handle(&RequestContext::new(&req), &mut resp).await.unwrap();

        assert_eq!(outcome, Outcome::Claimed);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
        assert_eq!(third.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_decline() {
        let a = Arc::new(Recording::declining());
        let b = Arc::new(Recording::declining());
        let chain = Chain::new().with_shared(a.clone()).with_shared(b.clone());

        let req = request(Method::POST, "/nowhere");
        let mut resp = ResponseWriter::new();
        let outcome = chain.handle(&RequestContext::new(&req), &mut resp).await.unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert_eq!((a.calls(), b.calls()), (1, 1));
        assert!(!resp.is_committed());
    }

    #[tokio::test]
    async fn test_claim_after_declines() {
        let declining = Arc::new(Recording::declining());
        let claiming = Arc::new(Recording::claiming());
        let after = Arc::new(Recording::claiming());
        let chain = Chain::new()
            .with_shared(declining.clone())
            .with_shared(claiming.clone())
            .with_shared(after.clone());

        let req = request(Method::GET, "/x");
        let mut resp = ResponseWriter::new();
        let outcome = chain.handle(&RequestContext::new(&req), &mut resp).await.unwrap();

        assert_eq!(outcome, Outcome::Claimed);
        assert_eq!((declining.calls(), claiming.calls(), after.calls()), (1, 1, 0));
    }

    #[tokio::test]
    async fn test_empty_chain_declines() {
        let req = request(Method::GET, "/");
        let mut resp = ResponseWriter::new();
        let outcome = Chain::new()
            .handle(&RequestContext::new(&req), &mut resp)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Declined);
    }

    #[tokio::test]
    async fn test_error_propagates_and_stops_chain() {
        let after = Arc::new(Recording::claiming());
        let chain = Chain::new().with(Failing).with_shared(after.clone());

        let req = request(Method::GET, "/");
        let mut resp = ResponseWriter::new();
        let result = chain.handle(&RequestContext::new(&req), &mut resp).await;

        assert!(matches!(result, Err(HandlerError::Delegate(_))));
        assert_eq!(after.calls(), 0);
    }

    #[tokio::test]
    async fn test_nested_chain_is_a_handler() {
        let inner_claim = Arc::new(Recording::claiming());
        let outer_after = Arc::new(Recording::claiming());
        let inner = Chain::new()
            .with(Recording::declining())
            .with_shared(inner_claim.clone());
        let outer = Chain::new().with(inner).with_shared(outer_after.clone());
        assert_eq!(outer.len(), 2);

        let req = request(Method::GET, "/nested");
        let mut resp = ResponseWriter::new();
        let outcome = outer.handle(&RequestContext::new(&req), &mut resp).await.unwrap();

        assert_eq!(outcome, Outcome::Claimed);
        assert_eq!(inner_claim.calls(), 1);
        assert_eq!(outer_after.calls(), 0);
    }
}
