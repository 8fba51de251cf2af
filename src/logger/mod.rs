//! Logger module
//!
//! Provides logging utilities for the web server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support
//!
//! There is no process-wide logger: a `Logger` is built from configuration at
//! startup and cloned into whatever needs it.

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogWriter;

use crate::config::LoggingConfig;
use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

/// Severity threshold, ordered from quietest to noisiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Cheap-to-clone handle to the shared log writer.
#[derive(Clone)]
pub struct Logger {
    writer: Arc<LogWriter>,
    level: Level,
    access_format: Arc<str>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("access_format", &self.access_format)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Build the logger described by the `[logging]` section.
    ///
    /// An unrecognized level falls back to `info` and says so.
    pub fn from_config(config: &LoggingConfig) -> io::Result<Self> {
        let writer = LogWriter::open(
            config.access_log_file.as_deref(),
            config.error_log_file.as_deref(),
        )?;
        let (level, level_error) = match config.level.parse::<Level>() {
            Ok(level) => (level, None),
            Err(e) => (Level::Info, Some(e)),
        };

        let logger = Self {
            writer: Arc::new(writer),
            level,
            access_format: Arc::from(config.access_log_format.as_str()),
        };
        if let Some(e) = level_error {
            logger.warning(&format!("{e}, using 'info'"));
        }
        Ok(logger)
    }

    /// Console-only logger with the `combined` access format.
    pub fn console(level: Level) -> Self {
        Self {
            writer: Arc::new(LogWriter::console()),
            level,
            access_format: Arc::from("combined"),
        }
    }

    pub const fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    pub fn error(&self, message: &str) {
        self.writer.write_error(&format!("[ERROR] {message}"));
    }

    pub fn warning(&self, message: &str) {
        if self.enabled(Level::Warn) {
            self.writer.write_error(&format!("[WARN] {message}"));
        }
    }

    pub fn info(&self, message: &str) {
        if self.enabled(Level::Info) {
            self.writer.write_access(message);
        }
    }

    pub fn debug(&self, message: &str) {
        if self.enabled(Level::Debug) {
            self.writer.write_access(&format!("[DEBUG] {message}"));
        }
    }

    /// Write a formatted access log line. Not subject to the level filter.
    pub fn access(&self, entry: &AccessLogEntry) {
        self.writer.write_access(&entry.format(&self.access_format));
    }

    pub fn server_started(&self, uri: &str) {
        self.info("======================================");
        self.info("Restabuild web server started");
        self.info(&format!("Listening on: {uri}"));
        self.info(&format!("Log level: {}", self.level));
        self.info("======================================");
    }

    pub fn server_stopped(&self, addr: &std::net::SocketAddr) {
        self.info(&format!("[Shutdown] Web server on {addr} stopped"));
    }

    pub fn connection_error(&self, err: &impl fmt::Display) {
        self.error(&format!("Failed to serve connection: {err}"));
    }
}
