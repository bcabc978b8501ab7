//! HTTP client for the village forecast operation.

use std::time::Duration;

use async_trait::async_trait;
use forecast_common::{ForecastError, ForecastRecord, ForecastResult, ForecastWindow, GridCell};
use forecast_engine::{ForecastSource, SourceError};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::KmaConfig;
use crate::payload::parse_payload;

/// Fetches one grid cell's forecast run from `getVilageFcst`.
#[derive(Debug, Clone)]
pub struct KmaClient {
    client: Client,
    config: KmaConfig,
}

impl KmaClient {
    /// Create a client with the given configuration.
    pub fn new(config: KmaConfig) -> ForecastResult<Self> {
        config.validate().map_err(ForecastError::ConfigError)?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ForecastError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &KmaConfig {
        &self.config
    }

    /// Query parameters for one cell and run, service key first.
    fn query(&self, cell: GridCell, window: &ForecastWindow) -> Vec<(&'static str, String)> {
        vec![
            ("serviceKey", self.config.service_key.clone()),
            ("pageNo", "1".to_string()),
            ("numOfRows", self.config.num_of_rows.to_string()),
            ("dataType", "JSON".to_string()),
            ("base_date", window.base_date()),
            ("base_time", window.base_time().to_string()),
            ("nx", cell.x.to_string()),
            ("ny", cell.y.to_string()),
        ]
    }

    fn map_transport(&self, e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout(self.config.request_timeout())
        } else {
            SourceError::transport(e.to_string())
        }
    }
}

#[async_trait]
impl ForecastSource for KmaClient {
    #[instrument(skip(self, window), fields(nx = cell.x, ny = cell.y, base = %window))]
    async fn fetch(&self, cell: GridCell, window: &ForecastWindow) -> Result<Vec<ForecastRecord>, SourceError> {
        let response = self
            .client
            .get(self.config.endpoint())
            .query(&self.query(cell, window))
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        let records = parse_payload(&body)?;

        debug!(records = records.len(), "Fetched forecast run");
        Ok(records)
    }
}
