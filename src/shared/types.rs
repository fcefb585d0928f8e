//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Storage service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub history_table: String,
    pub events_table: String,
}

/// Price tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// ISO 4217 code stamped onto every observation
    pub currency: String,
    /// Tag identifying the upstream price provider
    pub source: String,
}

/// Tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub storage: StorageConfig,
    pub tracking: TrackingConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                base_url: "".to_string(), // Will be set from config file
                api_key: "".to_string(),
                timeout_ms: 10000,
                history_table: "price_history".to_string(),
                events_table: "price_drop_events".to_string(),
            },
            tracking: TrackingConfig {
                currency: "USD".to_string(),
                source: "liteapi".to_string(),
            },
        }
    }
}
