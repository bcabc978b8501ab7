//! Forecast records as delivered for a single grid cell.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One (variable, target time, value) entry of a forecast run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Variable code (e.g. "TMP", "POP")
    pub category: String,
    /// Target time the value is forecast for
    pub forecast_at: NaiveDateTime,
    /// Raw value; not always numeric (e.g. "강수없음")
    pub value: String,
}

impl ForecastRecord {
    pub fn new(category: impl Into<String>, forecast_at: NaiveDateTime, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            forecast_at,
            value: value.into(),
        }
    }
}
