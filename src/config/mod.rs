mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

/// Loads configuration from the YAML file named by `CONFIG_PATH`
/// (default `config.yaml`). A missing file yields the built-in
/// defaults so the binary runs without any configuration on disk.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = match tokio::fs::read_to_string(&config_path).await {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config file at {}, using defaults", config_path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
