//! Regions and forecast grid cells.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A region to look up, identified by an opaque code and a representative
/// coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region identifier (e.g. an administrative district code)
    pub code: String,
    /// Latitude in degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Region {
    pub fn new(code: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            code: code.into(),
            latitude,
            longitude,
        }
    }
}

/// An integer cell of the upstream forecast grid.
///
/// Serialized as `{"nx": .., "ny": ..}`, the names the upstream API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    #[serde(rename = "nx")]
    pub x: i32,
    #[serde(rename = "ny")]
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
