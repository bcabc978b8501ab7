//! The upstream forecast collaborator.

use async_trait::async_trait;
use forecast_common::{ForecastRecord, ForecastWindow, GridCell};

use crate::error::Result;

/// Supplies the forecast records of one grid cell for one run.
///
/// A successful response without any item is [`crate::SourceError::NoRecords`].
/// An `Ok` with an empty list means the items were present but none was usable,
/// and resolves to no data.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetch every record the run holds for `cell`.
    async fn fetch(&self, cell: GridCell, window: &ForecastWindow) -> Result<Vec<ForecastRecord>>;
}
