//! phish-api: Phishing prediction server

use phish_api::{AppState, PredictServer, ServiceConfig};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => ServiceConfig::from_file(Path::new(path))?,
        None => ServiceConfig::default(),
    };

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "phish_api={level},phish_rs={level},tower_http={level}",
            level = config.logging.level
        )
        .into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("Starting phish-api v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path),
        None => info!("No config file specified, using defaults"),
    }

    let state = AppState::load(&config.artifacts.dir);
    let server = PredictServer::new(state, config.server.listen_addr.clone());
    server.run().await?;

    Ok(())
}
