//! HTTP entry point of the restabuild build queue.
//!
//! Requests flow through an ordered chain of handlers. The top-level chain logs
//! the request, redirects the server root and hands everything under the
//! configured context path to a nested chain (CORS headers, REST API, landing
//! page, web assets). The first handler to claim a request produces the
//! response; if nobody claims it the transport answers 404.

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::{HandlerError, ServerError};
pub use handler::{Chain, Handler, Outcome};
pub use http::{HttpRequest, RequestContext, ResponseWriter};
pub use server::{ServerSettings, WebServer};
