//! Error types for the region weather services.

use thiserror::Error;

/// Result type alias using ForecastError.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Primary error type for request-level failures.
///
/// Per-region failures never surface here; they are carried inside
/// [`crate::ForecastOutcome`] so a batch always completes.
#[derive(Debug, Error)]
pub enum ForecastError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Too many regions in one request: {count} (limit {limit})")]
    TooManyRegions { count: usize, limit: usize },

    // === Data Errors ===
    #[error("Projection error: {0}")]
    ProjectionError(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ForecastError {
    /// Short machine-readable code for error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            ForecastError::MissingParameter(_) => "MissingParameterValue",
            ForecastError::InvalidParameter { .. } => "InvalidParameterValue",
            ForecastError::TooManyRegions { .. } => "RequestTooLarge",
            ForecastError::ProjectionError(_) => "ProjectionFailed",
            ForecastError::ConfigError(_) => "NoApplicableCode",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ForecastError::MissingParameter(_)
            | ForecastError::InvalidParameter { .. }
            | ForecastError::ProjectionError(_) => 400,

            ForecastError::TooManyRegions { .. } => 413,

            ForecastError::ConfigError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ForecastError::MissingParameter("type".into()).http_status_code(), 400);
        assert_eq!(
            ForecastError::TooManyRegions { count: 900, limit: 500 }.http_status_code(),
            413
        );
        assert_eq!(ForecastError::ProjectionError("pole".into()).http_status_code(), 400);
        assert_eq!(ForecastError::ConfigError("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ForecastError::MissingParameter("type".into()).error_code(),
            "MissingParameterValue"
        );
        assert_eq!(
            ForecastError::TooManyRegions { count: 2, limit: 1 }.error_code(),
            "RequestTooLarge"
        );
    }
}
