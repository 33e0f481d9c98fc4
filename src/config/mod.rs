// Configuration module
// Author: kelexine (https://github.com/kelexine)

pub mod credentials;
mod models;

pub use credentials::{load_api_key, ApiKey};
pub use models::*;

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables
    /// 3. Config file (`path`, or `~/.gemini-vision-pro/config.toml`)
    /// 4. Defaults (lowest)
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path(),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists; an explicit path must exist
            .add_source(File::from(file).required(path.is_some()))
            // Override with environment variables (GEMINI_VISION_SERVER__PORT, ...)
            .add_source(
                Environment::with_prefix("GEMINI_VISION")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gemini-vision-pro")
            .join("config.toml")
    }
}
