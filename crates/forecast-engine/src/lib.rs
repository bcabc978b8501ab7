//! Region-to-grid deduplication and forecast selection.
//!
//! A batch of regions is projected onto the village forecast grid, bucketed
//! by grid cell, and answered with a single upstream fetch per cell. The
//! value chosen for a cell is fanned out to every region inside it.
//!
//! # Architecture
//!
//! ```text
//! POST /api/weather/regions
//!      │
//!      ▼
//! Aggregator::aggregate(regions, variable)
//!      │
//!      ├─► current_window(now) ── None ──► every region: BaseTime error
//!      │
//!      ├─► group_regions(regions)
//!      │         │
//!      │         ├─► projection failed: GPS Conv error
//!      │         │
//!      │         └─► CellGroup per distinct (nx, ny)
//!      │
//!      ├─► ForecastSource::fetch(cell, window)   (bounded, concurrent)
//!      │         │
//!      │         ├─► failure: Fetch / Parse error for the cell
//!      │         │
//!      │         └─► select(records, variable, window)
//!      │
//!      └─► fan out the cell outcome to its regions
//!               │
//!               ▼
//!          Vec<RegionForecast>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use forecast_engine::{Aggregator, AggregatorConfig};
//!
//! let aggregator = Aggregator::new(Arc::new(client), AggregatorConfig::from_env());
//! let results = aggregator.aggregate(regions, "TMP").await;
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod grouper;
pub mod selector;
pub mod source;

// Re-export commonly used types at crate root
pub use aggregator::Aggregator;
pub use config::AggregatorConfig;
pub use error::SourceError;
pub use grouper::{group_regions, CellGroup, RegionGroups};
pub use selector::{select, select_outcome};
pub use source::ForecastSource;
