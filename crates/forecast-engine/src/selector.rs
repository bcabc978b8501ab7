//! Selection of the forecast value answering a request.

use forecast_common::{unit_for, ForecastOutcome, ForecastRecord, ForecastWindow};

/// Pick the earliest record of `variable` at or after the run's issue time.
///
/// Category matching is exact. When several records share the earliest
/// target time the first one in input order wins.
pub fn select<'a>(
    records: &'a [ForecastRecord],
    variable: &str,
    window: &ForecastWindow,
) -> Option<&'a ForecastRecord> {
    let issued_at = window.issued_at();

    records
        .iter()
        .filter(|r| r.category == variable && r.forecast_at >= issued_at)
        .min_by_key(|r| r.forecast_at)
}

/// Resolve a cell's records into the outcome shared by its regions.
pub fn select_outcome(records: &[ForecastRecord], variable: &str, window: &ForecastWindow) -> ForecastOutcome {
    match select(records, variable, window) {
        Some(record) => ForecastOutcome::Value {
            value: record.value.clone(),
            unit: unit_for(variable),
        },
        None => ForecastOutcome::NoData,
    }
}
