//! Batched region weather lookup.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use forecast_common::{describe, ForecastError, Region, RegionResult};
use serde::Deserialize;
use tracing::{info, warn};

use super::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegionsQuery {
    /// Variable code, e.g. `TMP` or `POP`
    #[serde(rename = "type")]
    pub weather_type: Option<String>,
}

/// POST /api/weather/regions?type=<code>
///
/// Answers every region in the body with one result. Per-region failures are
/// reported inside the result list, never as an HTTP error.
pub async fn regions_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<RegionsQuery>,
    body: Result<Json<Vec<Region>>, JsonRejection>,
) -> Response {
    // Matched verbatim against upstream categories
    let variable = match params.weather_type {
        Some(v) if !v.trim().is_empty() => v,
        _ => return error_response(&ForecastError::MissingParameter("type".to_string())),
    };

    let regions = match body {
        Ok(Json(regions)) => regions,
        Err(rejection) => {
            return error_response(&ForecastError::InvalidParameter {
                param: "body".to_string(),
                message: rejection.body_text(),
            })
        }
    };

    let limit = state.config.limits.max_regions_per_request;
    if regions.len() > limit {
        return error_response(&ForecastError::TooManyRegions {
            count: regions.len(),
            limit,
        });
    }

    if regions.is_empty() {
        return Json(Vec::<RegionResult>::new()).into_response();
    }

    match describe(&variable) {
        Some(label) => info!(regions = regions.len(), variable = %variable, label, "Region weather request"),
        None => warn!(regions = regions.len(), variable = %variable, "Region weather request for unknown variable"),
    }

    let results: Vec<RegionResult> = state
        .aggregator
        .aggregate(regions, &variable)
        .await
        .into_iter()
        .map(RegionResult::from)
        .collect();

    Json(results).into_response()
}
