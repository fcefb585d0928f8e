use std::fs;
use crate::shared::types::TrackerConfig;
use crate::shared::errors::AppError;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from Config.toml in the working directory
    pub fn load_config() -> Result<TrackerConfig, AppError> {
        Self::load_from("Config.toml")
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &str) -> Result<TrackerConfig, AppError> {
        let config_content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: TrackerConfig = toml::from_str(&config_content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
