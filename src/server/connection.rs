// Connection handling module
// Serves one TCP connection and turns each request into a chain evaluation

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, HeaderMap, Request, Response};
use hyper_util::rt::TokioIo;

use super::ServerSettings;
use crate::handler::{Chain, Handler, Outcome};
use crate::http::{self, HttpRequest, RequestContext, ResponseWriter};
use crate::logger::{AccessLogEntry, Logger};

/// Everything a connection task needs, shared by all connections.
pub struct ServiceState {
    pub router: Chain,
    pub settings: ServerSettings,
    pub logger: Logger,
}

/// Serve `stream` on its own task.
///
/// The connection is cut once `request_timeout` elapses; in-flight work for a
/// vanished client is dropped with it.
pub fn serve_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, state: Arc<ServiceState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.settings.keep_alive);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&service_state);
                async move { Ok::<_, Infallible>(handle_request(req, peer_addr, &state).await) }
            }),
        );

        match tokio::time::timeout(state.settings.request_timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => state.logger.connection_error(&err),
            Err(_) => state.logger.warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                state.settings.request_timeout.as_secs()
            )),
        }
    });
}

/// Receive the body, run the router and write the access log line.
pub async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: &ServiceState,
) -> Response<Full<Bytes>> {
    let started = Instant::now();

    if let Some(response) = check_body_size(req.headers(), state.settings.max_body_size, &state.logger) {
        return response;
    }

    let (parts, body) = req.into_parts();
    let body = match read_body(body, state.settings.max_body_size, &state.logger).await {
        Ok(body) => body,
        Err(response) => return response,
    };
    let request = Request::from_parts(parts, body);

    let response = dispatch(&state.router, &request, &state.logger).await;

    if state.settings.access_log {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        let entry = AccessLogEntry::from_request(peer_addr, &request).with_response(
            response.status().as_u16(),
            body_bytes,
            started.elapsed(),
        );
        state.logger.access(&entry);
    }

    response
}

/// Evaluate `router` for one request and produce the wire response.
///
/// An unclaimed request becomes 404; a handler error becomes 500.
pub async fn dispatch(
    router: &dyn Handler,
    request: &HttpRequest,
    logger: &Logger,
) -> Response<Full<Bytes>> {
    let ctx = RequestContext::new(request);
    let mut writer = ResponseWriter::new();

    match router.handle(&ctx, &mut writer).await {
        Ok(Outcome::Claimed | Outcome::Declined) => writer.into_response(),
        Err(e) => {
            logger.error(&format!(
                "Handler failed for {} {}: {e}",
                request.method(),
                request.uri()
            ));
            writer.into_error_response()
        }
    }
}

/// Collect at most `max_body_size` bytes, whatever the framing. Chunked
/// bodies carry no `Content-Length`, so the limit is enforced while reading.
async fn read_body<B>(
    body: B,
    max_body_size: u64,
    logger: &Logger,
) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            logger.warning(&format!(
                "Request body too large: more than {max_body_size} bytes received"
            ));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger.warning(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response())
        }
    }
}

/// 413 when the declared `Content-Length` exceeds the limit.
fn check_body_size(
    headers: &HeaderMap,
    max_body_size: u64,
    logger: &Logger,
) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get(header::CONTENT_LENGTH)?;
    let Ok(size_str) = content_length.to_str() else {
        logger.warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger.warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Ok(_) => None,
        Err(_) => {
            logger.warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}
