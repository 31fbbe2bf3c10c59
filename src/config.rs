//! Application configuration loading from config.toml and the environment.
//!
//! The TOML file supplies the backend base URL and tuning knobs; environment
//! variables override it so deployments can repoint the client without
//! editing files. `.env` loading happens in `main`, before this module runs.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, fs, path::Path, time::Duration};

/// Environment override for the backend base URL
pub const ENV_API_BASE_URL: &str = "LEADSTAKE_API_BASE_URL";
/// Environment override for the config file path
pub const ENV_CONFIG_PATH: &str = "LEADSTAKE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the purchases backend, e.g. `https://api.example.com`
    pub api_base_url: String,
    /// Idle delay before a scheduled save fires, in milliseconds
    #[serde(default = "default_debounce_delay_ms")]
    pub debounce_delay_ms: u64,
    /// Per-request HTTP timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_debounce_delay_ms() -> u64 {
    600
}

const fn default_request_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// The debounce delay as a [`Duration`] for the session layer.
    #[must_use]
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    /// The HTTP timeout as a [`Duration`] for the API client.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Loads configuration from a TOML file at `path`.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads the effective application configuration: the TOML file (path from
/// `LEADSTAKE_CONFIG`, default `./config.toml`) with environment overrides
/// applied on top. When the file is absent, `LEADSTAKE_API_BASE_URL` alone is
/// enough to run.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = match load_config(&path) {
        Ok(config) => config,
        Err(err) if !Path::new(&path).exists() => {
            tracing::debug!("No config file at {path:?}, falling back to environment: {err}");
            AppConfig {
                api_base_url: String::new(),
                debounce_delay_ms: default_debounce_delay_ms(),
                request_timeout_secs: default_request_timeout_secs(),
            }
        }
        Err(err) => return Err(err),
    };

    if let Ok(base_url) = env::var(ENV_API_BASE_URL) {
        config.api_base_url = base_url;
    }

    if config.api_base_url.trim().is_empty() {
        return Err(Error::Config {
            message: format!(
                "no api_base_url configured: set it in {path:?} or via {ENV_API_BASE_URL}"
            ),
        });
    }

    Ok(config)
}
