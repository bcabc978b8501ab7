//! Client for the KMA village forecast service (`getVilageFcst`).
//!
//! [`KmaClient`] implements [`forecast_engine::ForecastSource`], so it can be
//! handed straight to the aggregator.

pub mod client;
pub mod config;
pub mod payload;

pub use client::KmaClient;
pub use config::{KmaConfig, DEFAULT_BASE_URL};
pub use payload::parse_payload;
