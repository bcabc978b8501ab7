//! Upstream API configuration.

use std::time::Duration;

use forecast_common::{ForecastError, ForecastResult};
use serde::{Deserialize, Serialize};

/// Default endpoint of the village forecast service.
pub const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr/1360000/VilageFcstInfoService_2.0";

/// Connection settings for the village forecast API.
#[derive(Clone, Serialize, Deserialize)]
pub struct KmaConfig {
    /// Service root; `/getVilageFcst` is appended
    pub base_url: String,

    /// Decoded service key, URL-encoded on the way out
    pub service_key: String,

    /// Page size; large enough to hold every record of one run
    pub num_of_rows: u32,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl KmaConfig {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_key: service_key.into(),
            num_of_rows: 1000,
            request_timeout_secs: 10,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `KMA_SERVICE_KEY` is required; everything else has a default.
    pub fn from_env() -> ForecastResult<Self> {
        let service_key = std::env::var("KMA_SERVICE_KEY")
            .map_err(|_| ForecastError::ConfigError("KMA_SERVICE_KEY is not set".to_string()))?;
        let base_url = std::env::var("KMA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url, service_key);

        if let Ok(val) = std::env::var("KMA_NUM_OF_ROWS") {
            if let Ok(rows) = val.parse() {
                config.num_of_rows = rows;
            }
        }

        if let Ok(val) = std::env::var("KMA_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.request_timeout_secs = secs;
            }
        }

        config.validate().map_err(ForecastError::ConfigError)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.service_key.trim().is_empty() {
            return Err("service_key must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("base_url must be an http(s) URL, got {}", self.base_url));
        }

        if self.num_of_rows == 0 {
            return Err("num_of_rows must be > 0".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be > 0".to_string());
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL of the village forecast operation.
    pub fn endpoint(&self) -> String {
        format!("{}/getVilageFcst", self.base_url.trim_end_matches('/'))
    }
}

// Keeps the service key out of logs
impl std::fmt::Debug for KmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KmaConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &"<redacted>")
            .field("num_of_rows", &self.num_of_rows)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
