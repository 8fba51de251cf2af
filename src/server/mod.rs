// Server module entry
// Owns the listening socket and the accept loop; the caller owns the
// returned `WebServer` and stops it with `close`

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::bind_listener;
pub use signal::wait_for_shutdown;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ServerError;
use crate::handler::router::build_router;
use crate::handler::{ContextPath, Handler};
use crate::logger::Logger;
use connection::{serve_connection, ServiceState};

/// Immutable settings the server runs with, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub context: ContextPath,
    pub web_dir: PathBuf,
    pub web_prefix: ContextPath,
    pub max_body_size: u64,
    pub keep_alive: bool,
    pub request_timeout: Duration,
    pub access_log: bool,
    pub show_headers: bool,
}

impl ServerSettings {
    /// Settings with the same defaults as the configuration file.
    pub fn new(addr: SocketAddr, context: ContextPath) -> Self {
        Self {
            addr,
            context,
            web_dir: PathBuf::from("web"),
            web_prefix: ContextPath::new("web"),
            max_body_size: 10_485_760,
            keep_alive: true,
            request_timeout: Duration::from_secs(30),
            access_log: true,
            show_headers: false,
        }
    }
}

/// A running web server.
///
/// Dropping it without `close` aborts the accept loop.
#[derive(Debug)]
pub struct WebServer {
    local_addr: SocketAddr,
    context: ContextPath,
    shutdown: watch::Sender<bool>,
    accept_task: Option<JoinHandle<()>>,
    logger: Logger,
}

impl WebServer {
    /// Bind the listener and start accepting. Must be called inside a tokio
    /// runtime. A port that cannot be bound is returned as an error.
    pub fn start(
        settings: ServerSettings,
        api: Arc<dyn Handler>,
        logger: Logger,
    ) -> Result<Self, ServerError> {
        let listener = bind_listener(settings.addr).map_err(|source| ServerError::Bind {
            addr: settings.addr,
            source,
        })?;
        let local_addr = listener.local_addr()?;
        let context = settings.context.clone();

        let state = Arc::new(ServiceState {
            router: build_router(&settings, api, logger.clone()),
            settings,
            logger: logger.clone(),
        });
        let (shutdown, shutdown_rx) = watch::channel(false);
        let accept_task = tokio::spawn(accept_loop(listener, state, shutdown_rx));

        let server = Self {
            local_addr,
            context,
            shutdown,
            accept_task: Some(accept_task),
            logger,
        };
        server.logger.server_started(&server.uri());
        Ok(server)
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Landing page URI, e.g. `http://127.0.0.1:8080/restabuild/`.
    pub fn uri(&self) -> String {
        format!("http://{}{}", self.local_addr, self.context.landing_path())
    }

    pub const fn is_running(&self) -> bool {
        self.accept_task.is_some()
    }

    /// Stop accepting and release the port. Connections already being served
    /// finish on their own tasks. Calling it again does nothing.
    pub async fn close(&mut self) {
        let Some(task) = self.accept_task.take() else {
            return;
        };
        // Err only means the loop already ended.
        let _ = self.shutdown.send(true);
        if let Err(e) = task.await {
            self.logger
                .error(&format!("Accept loop ended abnormally: {e}"));
        }
        self.logger.server_stopped(&self.local_addr);
    }
}

impl Drop for WebServer {
    fn drop(&mut self) {
        if let Some(task) = self.accept_task.take() {
            let _ = self.shutdown.send(true);
            task.abort();
        }
    }
}

/// Accept until shutdown is signalled; the listener is dropped on return.
async fn accept_loop(
    listener: TcpListener,
    state: Arc<ServiceState>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer_addr)) => {
                    state.logger.debug(&format!("[Connection] Accepted from: {peer_addr}"));
                    serve_connection(stream, peer_addr, Arc::clone(&state));
                }
                Err(e) => state.logger.error(&format!("Failed to accept connection: {e}")),
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
