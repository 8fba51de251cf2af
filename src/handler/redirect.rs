//! Server root redirect.

use super::{ContextPath, Handler, Outcome};
use crate::error::HandlerError;
use crate::http::{RequestContext, ResponseWriter};
use async_trait::async_trait;

/// Sends requests for exactly `/` to the context's landing page, whatever the
/// method. Everything else is declined untouched.
#[derive(Debug, Clone)]
pub struct RootRedirect {
    target: String,
}

impl RootRedirect {
    pub fn new(context: &ContextPath) -> Self {
        Self {
            target: context.landing_path(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

#[async_trait]
impl Handler for RootRedirect {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        if ctx.path() != "/" {
            return Ok(Outcome::Declined);
        }
        resp.redirect(&self.target)?;
        Ok(Outcome::Claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::request;
    use hyper::{header, Method, StatusCode};

    fn redirect() -> RootRedirect {
        RootRedirect::new(&ContextPath::new("restabuild"))
    }

    #[tokio::test]
    async fn test_root_redirects_for_every_method() {
        let methods = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ];
        for method in methods {
            let req = request(method.clone(), "/");
            let mut resp = ResponseWriter::new();
            let outcome = redirect()
                .handle(&RequestContext::new(&req), &mut resp)
                .await
                .unwrap();

            assert_eq!(outcome, Outcome::Claimed, "{method}");
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(resp.headers()[header::LOCATION], "/restabuild/");
        }
    }

    #[tokio::test]
    async fn test_root_with_query_still_redirects() {
        let req = request(Method::GET, "/?from=bookmark");
        let mut resp = ResponseWriter::new();
        let outcome = redirect()
            .handle(&RequestContext::new(&req), &mut resp)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Claimed);
    }

    #[tokio::test]
    async fn test_other_paths_untouched() {
        for path in ["/restabuild/", "/restabuild", "/index.html", "/web/"] {
            let req = request(Method::GET, path);
            let mut resp = ResponseWriter::new();
            let outcome = redirect()
                .handle(&RequestContext::new(&req), &mut resp)
                .await
                .unwrap();

            assert_eq!(outcome, Outcome::Declined, "{path}");
            assert!(!resp.is_committed());
            assert!(resp.headers().is_empty());
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }
}
