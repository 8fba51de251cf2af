//! Inbound request view handed to handlers.

use hyper::body::Bytes;
use hyper::{HeaderMap, Method, Request, Uri, Version};

/// A fully received request. The body is empty when the client sent none.
pub type HttpRequest = Request<Bytes>;

/// Borrowed view of a request as seen from inside nested contexts.
///
/// The context path is always a prefix of the request path, so it is tracked
/// as the number of path bytes consumed by enclosing context routers.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    request: &'a HttpRequest,
    consumed: usize,
}

impl<'a> RequestContext<'a> {
    pub const fn new(request: &'a HttpRequest) -> Self {
        Self {
            request,
            consumed: 0,
        }
    }

    pub const fn request(&self) -> &'a HttpRequest {
        self.request
    }

    pub fn method(&self) -> &'a Method {
        self.request.method()
    }

    pub fn uri(&self) -> &'a Uri {
        self.request.uri()
    }

    pub fn version(&self) -> Version {
        self.request.version()
    }

    pub fn headers(&self) -> &'a HeaderMap {
        self.request.headers()
    }

    /// Request body, `None` when empty.
    pub fn body(&self) -> Option<&'a Bytes> {
        let body = self.request.body();
        if body.is_empty() {
            None
        } else {
            Some(body)
        }
    }

    /// Absolute request path.
    pub fn path(&self) -> &'a str {
        self.request.uri().path()
    }

    /// Portion of the path matched by enclosing contexts, e.g. `/restabuild`.
    pub fn context_path(&self) -> &'a str {
        &self.path()[..self.consumed]
    }

    /// Path below the current context. Always starts with `/`.
    pub fn relative_path(&self) -> &'a str {
        let rest = &self.path()[self.consumed..];
        if rest.is_empty() {
            "/"
        } else {
            rest
        }
    }

    /// Enter a nested context, or `None` when the relative path is outside it.
    ///
    /// `prefix` is either empty or starts with `/` without a trailing slash.
    pub fn nest(&self, prefix: &str) -> Option<Self> {
        let rest = &self.path()[self.consumed..];
        strip_path_prefix(rest, prefix)?;
        Some(Self {
            request: self.request,
            consumed: self.consumed + prefix.len(),
        })
    }
}

/// Strip `prefix` from `path` on a segment boundary.
///
/// `/web` matches `/web` and `/web/app.js` but not `/website`. The returned
/// remainder is empty or starts with `/`.
pub fn strip_path_prefix<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
