use std::path::PathBuf;

use config_store::ConfigStore;
use thiserror::Error;

const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Invalid runtime settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {key} is set but empty")]
    Empty { key: &'static str },
}

/// Runtime settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Listen address, e.g. "0.0.0.0:8080".
    pub api_address: String,
    /// Location of the JSON configuration document.
    pub config_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_address: DEFAULT_API_ADDRESS.into(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl ServiceConfig {
    /// Environment variables used:
    /// - `API_ADDRESS` (default: "0.0.0.0:8080")
    /// - `CONFIG_PATH` (default: "config.json")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { key }),
                Some(v) => Ok(v.trim().to_string()),
                None => Ok(default.to_string()),
            }
        };

        Ok(Self {
            api_address: read("API_ADDRESS", DEFAULT_API_ADDRESS)?,
            config_path: PathBuf::from(read("CONFIG_PATH", DEFAULT_CONFIG_PATH)?),
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: ServiceConfig,
    /// Loaded once before the listener is bound; never modified.
    pub store: ConfigStore,
}

impl AppState {
    pub fn new(config: ServiceConfig, store: ConfigStore) -> Self {
        Self { config, store }
    }
}
