//! Weather API Service Library
//!
//! HTTP surface for batched region weather lookups against the village
//! forecast grid.

pub mod config;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::CorsConfig;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>, prometheus_handle: PrometheusHandle) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        // Weather lookups
        .route("/api/weather/regions", post(handlers::regions::regions_handler))
        // Diagnostics
        .route(
            "/api/coordinates/to-grid",
            get(handlers::coordinates::to_grid_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(Extension(prometheus_handle))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
