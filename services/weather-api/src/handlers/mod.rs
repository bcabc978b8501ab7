//! HTTP request handlers.

pub mod coordinates;
pub mod health;
pub mod regions;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use forecast_common::ForecastError;
use serde::Serialize;

/// JSON body returned for request-level errors.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub description: String,
}

impl From<&ForecastError> for ErrorBody {
    fn from(err: &ForecastError) -> Self {
        Self {
            code: err.error_code().to_string(),
            description: err.to_string(),
        }
    }
}

/// Render a request-level error with its status code.
pub(crate) fn error_response(err: &ForecastError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody::from(err))).into_response()
}
