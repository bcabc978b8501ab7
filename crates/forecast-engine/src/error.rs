//! Error types for upstream forecast sources.

use std::time::Duration;

use forecast_common::FailureKind;
use thiserror::Error;

/// Errors a [`crate::ForecastSource`] can report for one grid cell.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request could not be sent or the response not read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    /// The upstream answered with an empty body.
    #[error("upstream returned an empty body")]
    EmptyBody,

    /// The payload parsed but carried no forecast records.
    #[error("upstream returned no forecast records")]
    NoRecords,

    /// The upstream reported an API-level error code.
    #[error("upstream API error {code}: {message}")]
    Api { code: String, message: String },

    /// The payload did not have the expected structure.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The fetch did not finish in time.
    #[error("upstream fetch timed out after {0:?}")]
    Timeout(Duration),
}

impl SourceError {
    /// Create a Transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a Malformed error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Classify this error for the per-region outcome.
    ///
    /// An empty record list counts as a fetch failure, not as missing data.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            SourceError::Transport(_)
            | SourceError::Status { .. }
            | SourceError::EmptyBody
            | SourceError::NoRecords
            | SourceError::Timeout(_) => FailureKind::UpstreamFetchFailed,
            SourceError::Api { .. } | SourceError::Malformed(_) => FailureKind::ParseFailed,
        }
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
