//! Error types for request handling and server lifecycle.

use hyper::header::InvalidHeaderValue;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Faults raised while a handler builds a response.
///
/// The chain never catches these; the transport turns them into a 500.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A handler tried to write after the response body was already written.
    #[error("response already committed")]
    AlreadyCommitted,

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by an API delegate operation.
    #[error("delegate failed: {0}")]
    Delegate(String),
}

/// Fatal startup and lifecycle errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("context path must not be empty")]
    EmptyContext,

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
