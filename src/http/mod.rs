//! HTTP protocol layer module
//!
//! Request/response types shared by every handler, plus content-type and
//! cache helpers used when serving files.

pub mod cache;
pub mod mime;
pub mod request;
pub mod response;

pub use request::{strip_path_prefix, HttpRequest, RequestContext};
pub use response::{
    build_400_response, build_404_response, build_413_response, build_500_response,
    ResponseWriter,
};
