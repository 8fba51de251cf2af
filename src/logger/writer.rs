//! Log writer module
//!
//! Routes info/access lines and error lines to stdout/stderr or to
//! append-mode files. One writer is shared by cloning its owning `Logger`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn open_or(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(path) => Ok(Self::File(Mutex::new(open_log_file(path)?))),
            None => Ok(fallback),
        }
    }

    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    // A full disk must not take the request down with it.
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// Thread-safe log writer with separate access and error targets.
pub struct LogWriter {
    access: LogTarget,
    error: LogTarget,
}

impl LogWriter {
    /// Open the writer. `None` paths fall back to stdout (access) and
    /// stderr (error).
    pub fn open(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            access: LogTarget::open_or(access_log_file, LogTarget::Stdout)?,
            error: LogTarget::open_or(error_log_file, LogTarget::Stderr)?,
        })
    }

    /// Writer that only uses the console.
    pub const fn console() -> Self {
        Self {
            access: LogTarget::Stdout,
            error: LogTarget::Stderr,
        }
    }

    pub fn write_access(&self, message: &str) {
        self.access.write_line(message);
    }

    pub fn write_error(&self, message: &str) {
        self.error.write_line(message);
    }
}

/// Open or create a log file for appending, creating parent directories.
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let access = dir.path().join("logs/access.log");
        let error = dir.path().join("logs/error.log");

        let writer = LogWriter::open(access.to_str(), error.to_str()).unwrap();
        writer.write_access("GET /restabuild/ 200");
        writer.write_error("[ERROR] boom");
        writer.write_access("GET /restabuild/web/app.js 200");

        let access_text = std::fs::read_to_string(&access).unwrap();
        assert_eq!(access_text.lines().count(), 2);
        assert!(access_text.starts_with("GET /restabuild/ 200"));
        assert_eq!(std::fs::read_to_string(&error).unwrap(), "[ERROR] boom\n");
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access.log");
        std::fs::write(&path, "earlier\n").unwrap();

        let writer = LogWriter::open(path.to_str(), None).unwrap();
        writer.write_access("later");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier\nlater\n");
    }
}
