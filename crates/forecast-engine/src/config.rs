//! Configuration for the aggregator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for batched region lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Upper bound on upstream fetches in flight for one batch.
    pub max_concurrent_fetches: usize,

    /// Timeout for a single upstream fetch, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            fetch_timeout_secs: 15,
        }
    }
}

impl AggregatorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("FORECAST_MAX_CONCURRENT_FETCHES") {
            if let Ok(limit) = val.parse() {
                config.max_concurrent_fetches = limit;
            }
        }

        if let Ok(val) = std::env::var("FORECAST_FETCH_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.fetch_timeout_secs = secs;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_fetches == 0 {
            return Err("max_concurrent_fetches must be > 0".to_string());
        }

        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be > 0".to_string());
        }

        Ok(())
    }

    /// Get the per-fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
