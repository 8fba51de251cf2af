//! Landing page served at the context root.

use super::{Handler, Outcome};
use crate::error::HandlerError;
use crate::http::{RequestContext, ResponseWriter};
use async_trait::async_trait;
use hyper::{Method, StatusCode};

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Restabuild</title>
    <link rel="stylesheet" href="web/style.css">
</head>
<body>
    <main class="container">
        <h1>Restabuild</h1>
        <p>Queue builds of git repositories and follow their output.</p>
        <ul class="links">
            <li><a href="api.html">API reference</a></li>
            <li><a href="openapi.json">API description (OpenAPI JSON)</a></li>
        </ul>
        <form id="queue-form" method="post" action="api/builds">
            <label for="gitUrl">Git URL</label>
            <input id="gitUrl" name="gitUrl" type="url" placeholder="https://example.org/project.git">
            <button type="submit">Queue build</button>
        </form>
    </main>
    <script src="web/app.js"></script>
</body>
</html>
"#;

/// Serves the landing document for `GET` on the context root only.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexPage;

impl IndexPage {
    pub const fn html() -> &'static str {
        LANDING_PAGE
    }
}

#[async_trait]
impl Handler for IndexPage {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        if ctx.method() != Method::GET || ctx.relative_path() != "/" {
            return Ok(Outcome::Declined);
        }
        resp.write(StatusCode::OK, "text/html; charset=utf-8", LANDING_PAGE)?;
        Ok(Outcome::Claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::request;
    use hyper::header;

    async fn offer(method: Method, uri: &str, context: &str) -> (Outcome, ResponseWriter) {
        let req = request(method, uri);
        let ctx = RequestContext::new(&req).nest(context).unwrap();
        let mut resp = ResponseWriter::new();
        let outcome = IndexPage.handle(&ctx, &mut resp).await.unwrap();
        (outcome, resp)
    }

    #[tokio::test]
    async fn test_get_context_root() {
        let (outcome, resp) = offer(Method::GET, "/restabuild/", "/restabuild").await;
        assert_eq!(outcome, Outcome::Claimed);
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let html = std::str::from_utf8(resp.body().unwrap()).unwrap();
        assert!(html.contains("href=\"api.html\""));
    }

    #[tokio::test]
    async fn test_other_methods_decline() {
        for method in [Method::POST, Method::PUT, Method::HEAD, Method::OPTIONS] {
            let (outcome, resp) = offer(method, "/restabuild/", "/restabuild").await;
            assert_eq!(outcome, Outcome::Declined);
            assert!(!resp.is_committed());
        }
    }

    #[tokio::test]
    async fn test_other_paths_decline() {
        let (outcome, _) = offer(Method::GET, "/restabuild/index.html", "/restabuild").await;
        assert_eq!(outcome, Outcome::Declined);
        let (outcome, _) = offer(Method::GET, "/restabuild/web/", "/restabuild").await;
        assert_eq!(outcome, Outcome::Declined);
    }
}
