use shared_types::{AppConfig, AppError};
use std::sync::OnceLock;

use crate::error_convert::{toml_to_app_error, ValidateRequest};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
/// `CASETRACK_CONFIG` overrides it.
const CONFIG_PATH: &str = "config.toml";

fn config_path() -> String {
    std::env::var("CASETRACK_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string())
}

/// Parse and validate config file contents.
pub fn parse_config(contents: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig =
        toml::from_str(contents).map_err(|e| toml_to_app_error(contents, e))?;
    config.validate_request()?;
    Ok(config)
}

/// Apply environment overrides on top of the file config.
pub fn apply_env_overrides(mut config: AppConfig, bind_addr: Option<String>) -> AppConfig {
    if let Some(addr) = bind_addr.filter(|a| !a.trim().is_empty()) {
        config.server.bind_addr = addr;
    }
    config
}

fn read_config() -> AppConfig {
    let path = config_path();
    let config = match std::fs::read_to_string(&path) {
        Ok(contents) => parse_config(&contents).unwrap_or_else(|e| {
            tracing::warn!(%path, error = %e, "invalid config, using defaults");
            AppConfig::default()
        }),
        Err(e) => {
            tracing::warn!(%path, error = %e, "config file not found, using defaults");
            AppConfig::default()
        }
    };
    apply_env_overrides(config, std::env::var("BIND_ADDR").ok())
}

/// Load `.env` and the config file into the global `OnceLock`.
/// Only the first call reads anything.
pub fn load_config() -> &'static AppConfig {
    let _ = dotenvy::dotenv();
    let config = app_config();
    tracing::info!(features = ?config.features, refresh = ?config.refresh, "configuration loaded");
    config
}

/// The loaded configuration, read on first access.
pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(read_config)
}
