// Configuration module entry point
// Loads configuration from file and environment and derives the immutable
// settings the server runs with

mod types;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ServerError;
use crate::handler::ContextPath;
use crate::server::ServerSettings;

pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, WebConfig,
};

/// Prefix for environment overrides, e.g. `RESTABUILD_SERVER__PORT=9090`
const ENV_PREFIX: &str = "RESTABUILD";

impl Config {
    /// Load configuration from `config_path` (extension optional; the file may
    /// be absent), then environment overrides, on top of the defaults.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::with_defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    fn with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.context", "restabuild")?
            .set_default("web.dir", "web")?
            .set_default("web.prefix", "/web")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("performance.keep_alive", true)?
            .set_default("performance.request_timeout", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("logging.show_headers", false)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }

    /// Immutable settings for `WebServer::start`.
    pub fn server_settings(&self) -> Result<ServerSettings, ServerError> {
        let context = ContextPath::new(&self.server.context);
        if context.is_root() {
            return Err(ServerError::EmptyContext);
        }

        Ok(ServerSettings {
            addr: self.get_socket_addr()?,
            context,
            web_dir: PathBuf::from(&self.web.dir),
            web_prefix: ContextPath::new(&self.web.prefix),
            max_body_size: self.http.max_body_size,
            keep_alive: self.performance.keep_alive,
            request_timeout: Duration::from_secs(self.performance.request_timeout),
            access_log: self.logging.access_log,
            show_headers: self.logging.show_headers,
        })
    }
}
