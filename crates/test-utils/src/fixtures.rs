//! Common test fixtures for region weather tests.
//!
//! Coordinates come with the grid cell they project to on the village
//! forecast grid, so tests can reason about deduplication without
//! re-deriving the projection.

use forecast_common::{GridCell, Region};

/// A named coordinate with its known grid cell.
#[derive(Debug, Clone, Copy)]
pub struct KnownPoint {
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub nx: i32,
    pub ny: i32,
}

impl KnownPoint {
    pub fn region(&self) -> Region {
        Region::new(self.code, self.lat, self.lon)
    }

    pub fn cell(&self) -> GridCell {
        GridCell::new(self.nx, self.ny)
    }
}

/// Common coordinates for testing.
pub mod points {
    use super::KnownPoint;

    /// Seoul City Hall
    pub const SEOUL_CITY_HALL: KnownPoint = KnownPoint {
        code: "11140",
        lat: 37.5665,
        lon: 126.9780,
        nx: 60,
        ny: 127,
    };

    /// Jongno-gu office, same cell as Seoul City Hall
    pub const JONGNO: KnownPoint = KnownPoint {
        code: "11110",
        lat: 37.5735,
        lon: 126.9788,
        nx: 60,
        ny: 127,
    };

    /// Seodaemun-gu, one cell west of the city centre
    pub const SEODAEMUN: KnownPoint = KnownPoint {
        code: "11410",
        lat: 37.5798,
        lon: 126.9388,
        nx: 59,
        ny: 127,
    };

    /// Jeju City
    pub const JEJU: KnownPoint = KnownPoint {
        code: "50110",
        lat: 33.4996,
        lon: 126.5312,
        nx: 53,
        ny: 38,
    };

    /// Busan City Hall
    pub const BUSAN: KnownPoint = KnownPoint {
        code: "26110",
        lat: 35.1796,
        lon: 129.0756,
        nx: 98,
        ny: 76,
    };

    /// Reference point of the projection
    pub const GRID_ORIGIN: KnownPoint = KnownPoint {
        code: "ORIGIN",
        lat: 38.0,
        lon: 126.0,
        nx: 43,
        ny: 136,
    };
}

/// Common time values for testing (Korea Standard Time, naive).
pub mod time {
    use chrono::{NaiveDate, NaiveDateTime};

    /// 2024-05-15 12:00, inside the 11:00 run window
    pub fn midday() -> NaiveDateTime {
        at(2024, 5, 15, 12, 0)
    }

    /// 2024-05-15 01:00, before the first run of the day
    pub fn before_first_run() -> NaiveDateTime {
        at(2024, 5, 15, 1, 0)
    }

    pub fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hh, mm, 0))
            .unwrap_or_else(|| panic!("invalid fixture time {y}-{m}-{d} {hh}:{mm}"))
    }
}
