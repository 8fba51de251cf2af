// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use crate::logger::Logger;

/// Resolve once the process is asked to stop.
///
/// | Signal  | Action        |
/// |---------|---------------|
/// | SIGTERM | Graceful stop |
/// | SIGINT  | Graceful stop |
#[cfg(unix)]
pub async fn wait_for_shutdown(logger: &Logger) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    logger.debug(&format!(
        "[SIGNAL] Handlers registered for SIGTERM and SIGINT (pid {})",
        std::process::id()
    ));

    tokio::select! {
        _ = sigterm.recv() => logger.info("[SIGNAL] SIGTERM received, shutting down"),
        _ = sigint.recv() => logger.info("[SIGNAL] SIGINT received, shutting down"),
    }
    Ok(())
}

/// Non-unix fallback: only Ctrl+C is supported.
#[cfg(not(unix))]
pub async fn wait_for_shutdown(logger: &Logger) -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    logger.info("[SIGNAL] Ctrl+C received, shutting down");
    Ok(())
}
