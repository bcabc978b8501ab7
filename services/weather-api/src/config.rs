//! Service configuration loaded from YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Cross-origin settings for the browser frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:8080".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

/// Request size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum regions accepted in one batch.
    #[serde(default = "default_max_regions")]
    pub max_regions_per_request: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_regions_per_request: default_max_regions(),
        }
    }
}

fn default_max_regions() -> usize {
    500
}

impl ServiceConfig {
    /// Load configuration from a YAML file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                "Service config {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config: ServiceConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse: {:?}", path))?;

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config {:?}: {}", path, e))?;

        tracing::info!(
            origins = config.cors.allowed_origins.len(),
            max_regions = config.limits.max_regions_per_request,
            "Loaded service config from {:?}",
            path
        );

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.limits.max_regions_per_request == 0 {
            return Err("limits.max_regions_per_request must be > 0".to_string());
        }

        if let Some(origin) = self
            .cors
            .allowed_origins
            .iter()
            .find(|o| !o.starts_with("http://") && !o.starts_with("https://"))
        {
            return Err(format!("cors origin must be an http(s) URL: {}", origin));
        }

        Ok(())
    }
}
