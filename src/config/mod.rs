mod types;

pub use types::*;

use crate::Result;
use std::{env, path::Path};
use tracing::debug;

/// Environment variable that overrides `model.api_key`.
pub const API_TOKEN_ENV: &str = "HF_API_TOKEN";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

pub async fn load() -> Result<Config> {
    load_with(|key| env::var(key).ok()).await
}

/// Same as [`load`], reading variables through `lookup` instead of the process environment.
pub async fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let config_path = lookup(CONFIG_PATH_ENV).unwrap_or_else(|| "config.yaml".to_string());

    let config = load_from(&config_path).await?;

    Ok(apply_env(config, lookup))
}

/// Applies variable overrides on top of file values.
pub fn apply_env(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(token) = lookup(API_TOKEN_ENV) {
        debug!("Using API token from {}", API_TOKEN_ENV);
        config.model.api_key = token;
    }

    config
}

/// Reads the YAML file at `path`. A missing file yields the defaults.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await? {
        debug!(
            "Configuration file {} not found, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
