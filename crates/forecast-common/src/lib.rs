//! Common types and utilities shared across the region weather services.

pub mod error;
pub mod outcome;
pub mod record;
pub mod region;
pub mod time;
pub mod variable;

pub use error::{ForecastError, ForecastResult};
pub use outcome::{FailureKind, ForecastOutcome, RegionForecast, RegionResult};
pub use record::ForecastRecord;
pub use region::{GridCell, Region};
pub use time::{current_window, ForecastWindow, IssueSlot};
pub use variable::{describe, unit_for};
