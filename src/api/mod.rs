// API module entry
// Route table for the REST delegate and its machine-readable description

mod openapi;
mod page;
mod status;

pub use status::ServiceStatus;

use async_trait::async_trait;
use hyper::{Method, StatusCode};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::handler::{Handler, Outcome};
use crate::http::{RequestContext, ResponseWriter};

/// Context-relative path serving the route description.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Context-relative path of the HTML route listing.
pub const API_HTML_PATH: &str = "/api.html";

/// Metadata for one registered operation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiRoute {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub summary: String,
}

fn serialize_method<S: serde::Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

struct Entry {
    route: ApiRoute,
    operation: Arc<dyn Handler>,
}

/// API delegate built from a fixed table of `(method, path)` operations.
///
/// Matches the method and exact context-relative path; anything else is
/// declined so the rest of the chain can try it.
pub struct ApiRoutes {
    title: String,
    description: String,
    entries: Vec<Entry>,
}

impl fmt::Debug for ApiRoutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRoutes")
            .field("title", &self.title)
            .field("routes", &self.routes().collect::<Vec<_>>())
            .finish()
    }
}

impl ApiRoutes {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            entries: Vec::new(),
        }
    }

    /// Register an operation. Earlier registrations win on duplicates.
    #[must_use]
    pub fn route(
        mut self,
        method: Method,
        path: &str,
        summary: &str,
        operation: impl Handler + 'static,
    ) -> Self {
        self.entries.push(Entry {
            route: ApiRoute {
                method,
                path: path.to_string(),
                summary: summary.to_string(),
            },
            operation: Arc::new(operation),
        });
        self
    }

    pub fn routes(&self) -> impl Iterator<Item = &ApiRoute> {
        self.entries.iter().map(|entry| &entry.route)
    }

    pub fn openapi_document(&self) -> serde_json::Value {
        openapi::document(&self.title, &self.description, self.routes())
    }

    pub fn html_page(&self) -> String {
        page::render(&self.title, &self.description, self.routes())
    }
}

#[async_trait]
impl Handler for ApiRoutes {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        let path = ctx.relative_path();
        if ctx.method() == Method::GET {
            if path == OPENAPI_PATH {
                resp.json(StatusCode::OK, &self.openapi_document())?;
                return Ok(Outcome::Claimed);
            }
            if path == API_HTML_PATH {
                resp.write(StatusCode::OK, "text/html; charset=utf-8", self.html_page())?;
                return Ok(Outcome::Claimed);
            }
        }

        let matched = self
            .entries
            .iter()
            .find(|entry| entry.route.method == ctx.method() && entry.route.path == path);
        match matched {
            Some(entry) => entry.operation.handle(ctx, resp).await,
            None => Ok(Outcome::Declined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::{request, Recording};

    struct Queued;

    #[async_trait]
    impl Handler for Queued {
        async fn handle(
            &self,
            ctx: &RequestContext<'_>,
            resp: &mut ResponseWriter,
        ) -> Result<Outcome, HandlerError> {
            let body_len = ctx.body().map_or(0, |b| b.len());
            resp.json(StatusCode::CREATED, &serde_json::json!({ "received": body_len }))?;
            Ok(Outcome::Claimed)
        }
    }

    fn api() -> ApiRoutes {
        ApiRoutes::new("Restabuild API", "An API to queue and interact with builds.")
            .route(Method::POST, "/api/builds", "Queue a build", Queued)
            .route(Method::GET, "/api/status", "Service status", ServiceStatus::new("0.1.0"))
    }

    async fn offer(api: &ApiRoutes, method: Method, uri: &str) -> (Outcome, ResponseWriter) {
        let req = request(method, uri);
        let ctx = RequestContext::new(&req).nest("/restabuild").unwrap();
        let mut resp = ResponseWriter::new();
        let outcome = api.handle(&ctx, &mut resp).await.unwrap();
        (outcome, resp)
    }

    #[tokio::test]
    async fn test_dispatches_on_method_and_path() {
        let (outcome, resp) = offer(&api(), Method::POST, "/restabuild/api/builds").await;
        assert_eq!(outcome, Outcome::Claimed);
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unregistered_routes_decline() {
        let api = api();
        for (method, uri) in [
            (Method::GET, "/restabuild/api/builds"),
            (Method::POST, "/restabuild/api/builds/1"),
            (Method::GET, "/restabuild/"),
            (Method::GET, "/restabuild/web/app.js"),
        ] {
            let (outcome, resp) = offer(&api, method, uri).await;
            assert_eq!(outcome, Outcome::Declined, "{uri}");
            assert!(!resp.is_committed());
        }
    }

    #[tokio::test]
    async fn test_operation_decline_is_passed_through() {
        let api = ApiRoutes::new("t", "d").route(Method::GET, "/maybe", "", Recording::declining());
        let (outcome, _) = offer(&api, Method::GET, "/restabuild/maybe").await;
        assert_eq!(outcome, Outcome::Declined);
    }

    #[tokio::test]
    async fn test_serves_route_description() {
        let (outcome, resp) = offer(&api(), Method::GET, "/restabuild/openapi.json").await;
        assert_eq!(outcome, Outcome::Claimed);
        let doc: serde_json::Value = serde_json::from_slice(resp.body().unwrap()).unwrap();
        assert_eq!(doc["info"]["title"], "Restabuild API");
        assert_eq!(doc["paths"]["/api/builds"]["post"]["summary"], "Queue a build");
    }

    #[tokio::test]
    async fn test_serves_route_listing_page() {
        let (outcome, resp) = offer(&api(), Method::GET, "/restabuild/api.html").await;
        assert_eq!(outcome, Outcome::Claimed);
        assert_eq!(resp.headers()[hyper::header::CONTENT_TYPE], "text/html; charset=utf-8");
        let html = std::str::from_utf8(resp.body().unwrap()).unwrap();
        assert!(html.contains("<code>/api/builds</code>"));
        assert!(html.contains("Service status"));

        let (outcome, _) = offer(&api(), Method::POST, "/restabuild/api.html").await;
        assert_eq!(outcome, Outcome::Declined);
    }

    #[test]
    fn test_route_metadata() {
        let api = api();
        let routes: Vec<_> = api.routes().collect();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].method, Method::POST);
        assert_eq!(routes[1].path, "/api/status");

        let json = serde_json::to_value(routes[0]).unwrap();
        assert_eq!(json["method"], "POST");
    }
}
