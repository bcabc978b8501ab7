//! Per-region forecast outcomes and their wire representation.
//!
//! Internally every region resolves to a tagged [`ForecastOutcome`]. The
//! sentinel strings the frontend understands (`"Error"`, `"N/A"`) only appear
//! when converting to [`RegionResult`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value for any failed lookup.
pub const ERROR_VALUE: &str = "Error";

/// Wire value for a successful lookup without matching data.
pub const NO_DATA_VALUE: &str = "N/A";

/// Why a region could not be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The forecast window could not be computed.
    BaseTimeUnavailable,
    /// The region's coordinates did not project to a grid cell.
    CoordinateConversionFailed,
    /// Transport error, non-success status or empty payload.
    UpstreamFetchFailed,
    /// Malformed payload or an upstream API error code.
    ParseFailed,
}

impl FailureKind {
    /// Unit-field marker used on the wire for this failure.
    pub fn marker(&self) -> &'static str {
        match self {
            FailureKind::BaseTimeUnavailable => "BaseTime",
            FailureKind::CoordinateConversionFailed => "GPS Conv",
            FailureKind::UpstreamFetchFailed => "Fetch",
            FailureKind::ParseFailed => "Parse",
        }
    }

    /// Label for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::BaseTimeUnavailable => "base_time_unavailable",
            FailureKind::CoordinateConversionFailed => "coordinate_conversion_failed",
            FailureKind::UpstreamFetchFailed => "upstream_fetch_failed",
            FailureKind::ParseFailed => "parse_failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of looking up one grid cell, shared by every region in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastOutcome {
    /// A forecast value was selected.
    Value { value: String, unit: &'static str },
    /// The upstream answered but holds no future record for the variable.
    NoData,
    /// The lookup failed.
    Failed(FailureKind),
}

impl ForecastOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ForecastOutcome::Failed(_))
    }
}

/// Outcome for one input region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionForecast {
    pub region_code: String,
    pub variable: String,
    pub outcome: ForecastOutcome,
}

impl RegionForecast {
    pub fn new(region_code: impl Into<String>, variable: impl Into<String>, outcome: ForecastOutcome) -> Self {
        Self {
            region_code: region_code.into(),
            variable: variable.into(),
            outcome,
        }
    }

    pub fn failed(region_code: impl Into<String>, variable: impl Into<String>, kind: FailureKind) -> Self {
        Self::new(region_code, variable, ForecastOutcome::Failed(kind))
    }
}

/// Wire representation of a region's forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionResult {
    pub region_code: String,
    pub weather_type: String,
    pub value: String,
    pub unit: String,
}

impl From<RegionForecast> for RegionResult {
    fn from(forecast: RegionForecast) -> Self {
        let (value, unit) = match forecast.outcome {
            ForecastOutcome::Value { value, unit } => (value, unit.to_string()),
            ForecastOutcome::NoData => (NO_DATA_VALUE.to_string(), String::new()),
            ForecastOutcome::Failed(kind) => (ERROR_VALUE.to_string(), kind.marker().to_string()),
        };

        Self {
            region_code: forecast.region_code,
            weather_type: forecast.variable,
            value,
            unit,
        }
    }
}
