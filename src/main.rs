use std::sync::Arc;

use hyper::Method;

use restabuild_web::api::{ApiRoutes, ServiceStatus};
use restabuild_web::config::Config;
use restabuild_web::logger::Logger;
use restabuild_web::server::{wait_for_shutdown, WebServer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = Config::load_from(&config_path)?;
    let logger = Logger::from_config(&cfg.logging)?;

    // Worker count follows `server.workers`, defaulting to one per CPU core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger.info(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        logger.info("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(run(cfg, logger))
}

async fn run(cfg: Config, logger: Logger) -> Result<(), Box<dyn std::error::Error>> {
    let settings = cfg.server_settings()?;
    logger.info(&format!(
        "[CONFIG] Web assets: {} under {}{}",
        settings.web_dir.display(),
        settings.context.as_str(),
        settings.web_prefix.as_str()
    ));
    logger.info(&format!("[CONFIG] Max body size: {} bytes", settings.max_body_size));

    let api = ApiRoutes::new("Restabuild API", "An API to queue and interact with builds.").route(
        Method::GET,
        "/api/status",
        "Service status",
        ServiceStatus::new(env!("CARGO_PKG_VERSION")),
    );

    let mut server = WebServer::start(settings, Arc::new(api), logger.clone())?;
    wait_for_shutdown(&logger).await?;
    server.close().await;
    Ok(())
}
