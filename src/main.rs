use anyhow::{Context, Result};
use predict_server::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sets up the JSON tracing subscriber. `RUST_LOG` takes precedence
/// over the configured level; an unparseable level is a startup error.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| {
            format!("Invalid log level: '{level}'. Valid levels: error, warn, info, debug, trace")
        })?;

    tracing_subscriber::fmt().with_env_filter(filter).json().init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = config::load()
        .await
        .context("Failed to load configuration")?;

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());
    init_logging(&log_level)?;

    info!("Starting predict-server with log level: {}", log_level);

    server::run(config).await?;

    Ok(())
}
