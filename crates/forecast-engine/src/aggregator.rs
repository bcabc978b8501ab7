//! Per-request orchestration of a batched region lookup.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use forecast_common::time::kst_now;
use forecast_common::{
    current_window, FailureKind, ForecastOutcome, ForecastRecord, ForecastWindow, GridCell, Region,
    RegionForecast,
};
use futures::stream::{self, StreamExt};
use metrics::{counter, histogram};
use projection::LambertConformal;
use tracing::{debug, info, instrument, warn};

use crate::config::AggregatorConfig;
use crate::error::SourceError;
use crate::grouper::{group_regions, CellGroup};
use crate::selector::select_outcome;
use crate::source::ForecastSource;

/// Answers a batch of regions with one upstream fetch per distinct grid cell.
pub struct Aggregator {
    source: Arc<dyn ForecastSource>,
    projection: LambertConformal,
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create an aggregator on the village forecast grid.
    pub fn new(source: Arc<dyn ForecastSource>, config: AggregatorConfig) -> Self {
        Self {
            source,
            projection: LambertConformal::kma_dfs(),
            config,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn projection(&self) -> &LambertConformal {
        &self.projection
    }

    /// Resolve `variable` for every region against the current run.
    pub async fn aggregate(&self, regions: Vec<Region>, variable: &str) -> Vec<RegionForecast> {
        self.aggregate_at(regions, variable, kst_now()).await
    }

    /// Resolve `variable` for every region against the run valid at `now`.
    ///
    /// Exactly one result is returned per input region. Output order is not
    /// tied to input order.
    #[instrument(skip(self, regions), fields(regions = regions.len()))]
    pub async fn aggregate_at(&self, regions: Vec<Region>, variable: &str, now: NaiveDateTime) -> Vec<RegionForecast> {
        let started = Instant::now();
        counter!("forecast_requests_total").increment(1);
        counter!("forecast_regions_total").increment(regions.len() as u64);

        let Some(window) = current_window(now) else {
            warn!(%now, "No forecast run could be computed");
            record_failure(FailureKind::BaseTimeUnavailable);
            return regions
                .into_iter()
                .map(|r| RegionForecast::failed(r.code, variable, FailureKind::BaseTimeUnavailable))
                .collect();
        };

        let grouped = group_regions(regions, &self.projection);
        let mut results = Vec::with_capacity(grouped.region_count());

        for region in grouped.unprojectable {
            warn!(
                code = %region.code,
                lat = region.latitude,
                lon = region.longitude,
                "Coordinate conversion failed"
            );
            record_failure(FailureKind::CoordinateConversionFailed);
            results.push(RegionForecast::failed(
                region.code,
                variable,
                FailureKind::CoordinateConversionFailed,
            ));
        }

        let cells = grouped.groups.len();
        debug!(cells, window = %window, "Regions grouped");

        let limit = self.config.max_concurrent_fetches.max(1);
        let per_cell: Vec<Vec<RegionForecast>> = stream::iter(grouped.groups)
            .map(|group| self.resolve_cell(group, variable, window))
            .buffer_unordered(limit)
            .collect()
            .await;

        results.extend(per_cell.into_iter().flatten());

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        histogram!("forecast_aggregation_duration_ms").record(elapsed_ms);
        info!(
            cells,
            results = results.len(),
            window = %window,
            elapsed_ms,
            "Aggregation complete"
        );

        results
    }

    async fn resolve_cell(&self, group: CellGroup, variable: &str, window: ForecastWindow) -> Vec<RegionForecast> {
        let outcome = match self.fetch_cell(group.cell, &window).await {
            Ok(records) => select_outcome(&records, variable, &window),
            Err(e) => {
                warn!(
                    nx = group.cell.x,
                    ny = group.cell.y,
                    regions = group.regions.len(),
                    error = %e,
                    "Upstream lookup failed"
                );
                let kind = e.failure_kind();
                record_failure(kind);
                ForecastOutcome::Failed(kind)
            }
        };

        group
            .regions
            .into_iter()
            .map(|r| RegionForecast::new(r.code, variable, outcome.clone()))
            .collect()
    }

    async fn fetch_cell(&self, cell: GridCell, window: &ForecastWindow) -> Result<Vec<ForecastRecord>, SourceError> {
        counter!("forecast_upstream_fetches_total").increment(1);

        let timeout = self.config.fetch_timeout();
        match tokio::time::timeout(timeout, self.source.fetch(cell, window)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(timeout)),
        }
    }
}

fn record_failure(kind: FailureKind) {
    counter!("forecast_cell_failures_total", "kind" => kind.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use test_utils::fixtures::{points, time};

    struct FixedSource(Vec<ForecastRecord>);

    #[async_trait]
    impl ForecastSource for FixedSource {
        async fn fetch(&self, _cell: GridCell, _window: &ForecastWindow) -> Result<Vec<ForecastRecord>, SourceError> {
            Ok(self.0.clone())
        }
    }

    fn aggregator(records: Vec<ForecastRecord>) -> Aggregator {
        Aggregator::new(Arc::new(FixedSource(records)), AggregatorConfig::default())
    }

    #[tokio::test]
    async fn test_unknown_variable_is_no_data() {
        let at = time::at(2024, 5, 15, 12, 0);
        let agg = aggregator(vec![ForecastRecord::new("TMP", at, "21")]);

        let results = agg
            .aggregate_at(vec![points::JEJU.region()], "XYZ", time::midday())
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].outcome, ForecastOutcome::NoData);
        assert_eq!(results[0].variable, "XYZ");
    }

    #[tokio::test]
    async fn test_calendar_underflow_fails_every_region() {
        let agg = aggregator(Vec::new());
        let earliest = chrono::NaiveDate::MIN.and_hms_opt(0, 30, 0).unwrap();

        let results = agg
            .aggregate_at(
                vec![points::JEJU.region(), points::BUSAN.region()],
                "TMP",
                earliest,
            )
            .await;

        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.outcome, ForecastOutcome::Failed(FailureKind::BaseTimeUnavailable));
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = aggregator(Vec::new()).aggregate_at(Vec::new(), "TMP", time::midday()).await;
        assert!(results.is_empty());
    }
}
