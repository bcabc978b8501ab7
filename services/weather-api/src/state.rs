//! Application state for the weather API.

use std::sync::Arc;

use anyhow::{Context, Result};
use forecast_engine::{Aggregator, AggregatorConfig, ForecastSource};
use kma_client::{KmaClient, KmaConfig};

use crate::config::ServiceConfig;

/// Shared application state.
pub struct AppState {
    /// Batched region lookup engine.
    pub aggregator: Aggregator,

    /// Service configuration (CORS, limits).
    pub config: ServiceConfig,

    /// Upstream service root, reported by `/ready`.
    pub upstream_base_url: String,
}

impl AppState {
    /// Create state backed by the village forecast API, configured from the
    /// environment.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let kma_config = KmaConfig::from_env().context("Failed to load upstream configuration")?;
        let aggregator_config = AggregatorConfig::from_env();
        aggregator_config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid aggregator configuration: {}", e))?;

        let upstream_base_url = kma_config.base_url.clone();
        let client = KmaClient::new(kma_config).context("Failed to create upstream client")?;

        Ok(Self::with_source(
            Arc::new(client),
            aggregator_config,
            config,
            upstream_base_url,
        ))
    }

    /// Create state around an arbitrary forecast source.
    pub fn with_source(
        source: Arc<dyn ForecastSource>,
        aggregator_config: AggregatorConfig,
        config: ServiceConfig,
        upstream_base_url: impl Into<String>,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(source, aggregator_config),
            config,
            upstream_base_url: upstream_base_url.into(),
        }
    }
}
