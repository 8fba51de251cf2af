//! HTTP response building module
//!
//! `ResponseWriter` is the mutable response a handler chain works on. Headers
//! can be added until the body is written; writing the body commits status,
//! headers and body at once, and only once.

use crate::error::HandlerError;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderName, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};
use serde::Serialize;

/// Write-once response under construction.
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Written body, `None` until committed.
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub const fn is_committed(&self) -> bool {
        self.body.is_some()
    }

    /// Append a header value, keeping any existing values for the same name.
    pub fn append_header(&mut self, name: HeaderName, value: &str) -> Result<(), HandlerError> {
        self.ensure_open()?;
        self.headers.append(name, HeaderValue::from_str(value)?);
        Ok(())
    }

    /// Set a header, replacing existing values.
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> Result<(), HandlerError> {
        self.ensure_open()?;
        self.headers.insert(name, HeaderValue::from_str(value)?);
        Ok(())
    }

    /// Commit the response with a body and content type.
    pub fn write(
        &mut self,
        status: StatusCode,
        content_type: &str,
        body: impl Into<Bytes>,
    ) -> Result<(), HandlerError> {
        self.set_header(header::CONTENT_TYPE, content_type)?;
        self.commit(status, body.into());
        Ok(())
    }

    /// Commit the response without a body, e.g. 204 or 304.
    pub fn write_empty(&mut self, status: StatusCode) -> Result<(), HandlerError> {
        self.ensure_open()?;
        self.commit(status, Bytes::new());
        Ok(())
    }

    /// Commit a JSON body.
    pub fn json<T: Serialize + ?Sized>(
        &mut self,
        status: StatusCode,
        value: &T,
    ) -> Result<(), HandlerError> {
        let json = serde_json::to_vec_pretty(value)?;
        self.write(status, "application/json", json)
    }

    /// Commit a 302 redirect to `location`.
    pub fn redirect(&mut self, location: &str) -> Result<(), HandlerError> {
        self.set_header(header::LOCATION, location)?;
        self.write(StatusCode::FOUND, "text/plain", "Redirecting...")
    }

    /// Convert into a hyper response. An uncommitted writer becomes the
    /// default 404, keeping headers handlers already added.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let Self {
            status,
            headers,
            body,
        } = self;

        match body {
            Some(body) => {
                let mut response = Response::new(Full::new(body));
                *response.status_mut() = status;
                *response.headers_mut() = headers;
                response
            }
            None => carry_headers(build_404_response(), headers),
        }
    }

    /// The 500 sent when a handler fails, keeping headers handlers already
    /// added. Whatever the failing handler wrote is discarded.
    pub fn into_error_response(self) -> Response<Full<Bytes>> {
        carry_headers(build_500_response(), self.headers)
    }

    fn ensure_open(&self) -> Result<(), HandlerError> {
        if self.is_committed() {
            Err(HandlerError::AlreadyCommitted)
        } else {
            Ok(())
        }
    }

    fn commit(&mut self, status: StatusCode, body: Bytes) {
        self.status = status;
        self.body = Some(body);
    }
}

/// Append `headers` to a prebuilt response; its own entity headers stay.
fn carry_headers(mut response: Response<Full<Bytes>>, headers: HeaderMap) -> Response<Full<Bytes>> {
    let mut current = None;
    for (name, value) in headers {
        if let Some(name) = name {
            current = Some(name);
        }
        let Some(name) = &current else { continue };
        if *name == header::CONTENT_TYPE || *name == header::CONTENT_LENGTH {
            continue;
        }
        response.headers_mut().append(name.clone(), value);
    }
    response
}

fn plain_text(status: StatusCode, message: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(message.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    plain_text(StatusCode::BAD_REQUEST, "400 Bad Request")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    plain_text(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    plain_text(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large")
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
}
