//! Coordinate-to-grid diagnostic endpoint.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use forecast_common::{ForecastError, GridCell};
use serde::{Deserialize, Serialize};

use super::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToGridQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Grid cell of a coordinate, with the cell's own grid point.
#[derive(Debug, Serialize)]
pub struct ToGridResponse {
    #[serde(flatten)]
    pub cell: GridCell,
    pub center: CellCenter,
}

#[derive(Debug, Serialize)]
pub struct CellCenter {
    pub lat: f64,
    pub lon: f64,
}

/// GET /api/coordinates/to-grid?lat=..&lon=..
pub async fn to_grid_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ToGridQuery>,
) -> Response {
    let lat = match require_finite("lat", params.lat) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };
    let lon = match require_finite("lon", params.lon) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    let projection = state.aggregator.projection();
    match projection.project(lat, lon) {
        Ok(cell) => {
            let (center_lat, center_lon) = projection.cell_center(cell);
            Json(ToGridResponse {
                cell,
                center: CellCenter {
                    lat: center_lat,
                    lon: center_lon,
                },
            })
            .into_response()
        }
        Err(e) => error_response(&ForecastError::ProjectionError(e.to_string())),
    }
}

fn require_finite(param: &str, value: Option<f64>) -> Result<f64, ForecastError> {
    match value {
        None => Err(ForecastError::MissingParameter(param.to_string())),
        Some(v) if !v.is_finite() => Err(ForecastError::InvalidParameter {
            param: param.to_string(),
            message: "must be a finite number".to_string(),
        }),
        Some(v) => Ok(v),
    }
}
