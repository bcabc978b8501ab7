//! Lambert Conformal Conic projection.
//!
//! The village forecast service publishes its short-range forecast on a
//! 5 km grid laid out on a secant Lambert conformal cone. Grid cells are
//! addressed by integer `(nx, ny)` pairs which the upstream API expects
//! verbatim, so the projection below has to reproduce the publisher's
//! arithmetic exactly, including the `+ 0.5` followed by truncation.
//!
//! The projection parameters include:
//! - Earth radius and grid spacing (km)
//! - Standard parallels: slat1 and slat2
//! - Reference point: olon, olat
//! - Grid offset of the reference point: xo, yo (grid units)

use std::f64::consts::PI;

use forecast_common::GridCell;
use thiserror::Error;

const DEG_TO_RAD: f64 = PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Errors from projecting a coordinate onto the grid.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// The projected grid coordinate was NaN or infinite.
    #[error("coordinate ({latitude}, {longitude}) has no finite grid position")]
    NonFinite { latitude: f64, longitude: f64 },
}

/// Lambert Conformal Conic projection parameters.
///
/// Distances are kept in grid units (earth radius divided by grid spacing)
/// so projected coordinates are directly grid indices.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    /// Earth radius in grid units
    pub re: f64,
    /// First standard parallel in radians
    pub slat1: f64,
    /// Second standard parallel in radians
    pub slat2: f64,
    /// Reference longitude in radians
    pub olon: f64,
    /// Reference latitude in radians
    pub olat: f64,
    /// X offset of the reference point (grid units)
    pub xo: f64,
    /// Y offset of the reference point (grid units)
    pub yo: f64,
    /// Cone constant
    sn: f64,
    /// Scale factor
    sf: f64,
    /// Radius at the reference latitude
    ro: f64,
}

impl LambertConformal {
    /// Create a projection from its defining parameters.
    ///
    /// # Arguments
    /// * `earth_radius_km` - Earth radius (km)
    /// * `grid_km` - Grid spacing (km)
    /// * `slat1_deg` - First standard parallel (degrees)
    /// * `slat2_deg` - Second standard parallel (degrees)
    /// * `olon_deg` - Reference longitude (degrees)
    /// * `olat_deg` - Reference latitude (degrees)
    /// * `xo` - X offset of the reference point (grid units)
    /// * `yo` - Y offset of the reference point (grid units)
    #[allow(clippy::too_many_arguments)]
    pub fn from_params(
        earth_radius_km: f64,
        grid_km: f64,
        slat1_deg: f64,
        slat2_deg: f64,
        olon_deg: f64,
        olat_deg: f64,
        xo: f64,
        yo: f64,
    ) -> Self {
        let re = earth_radius_km / grid_km;
        let slat1 = slat1_deg * DEG_TO_RAD;
        let slat2 = slat2_deg * DEG_TO_RAD;
        let olon = olon_deg * DEG_TO_RAD;
        let olat = olat_deg * DEG_TO_RAD;

        // Cone constant for a secant cone
        let sn = (slat1.cos() / slat2.cos()).ln()
            / ((PI * 0.25 + slat2 * 0.5).tan() / (PI * 0.25 + slat1 * 0.5).tan()).ln();

        let sf = (PI * 0.25 + slat1 * 0.5).tan().powf(sn) * slat1.cos() / sn;
        let ro = re * sf / (PI * 0.25 + olat * 0.5).tan().powf(sn);

        Self {
            re,
            slat1,
            slat2,
            olon,
            olat,
            xo,
            yo,
            sn,
            sf,
            ro,
        }
    }

    /// The village forecast (DFS) grid.
    ///
    /// - Earth radius 6371.00877 km, 5 km spacing
    /// - Standard parallels 30°N and 60°N
    /// - Reference point 38°N 126°E at grid (43, 136)
    pub fn kma_dfs() -> Self {
        Self::from_params(
            6371.00877, // earth radius
            5.0,        // grid spacing
            30.0,       // slat1
            60.0,       // slat2
            126.0,      // olon
            38.0,       // olat
            43.0,       // xo
            136.0,      // yo
        )
    }

    /// Convert geographic coordinates (degrees) to fractional grid coordinates.
    pub fn geo_to_grid(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let ra = self.re * self.sf / (PI * 0.25 + lat_deg * DEG_TO_RAD * 0.5).tan().powf(self.sn);

        // Single wrap into [-π, π] before scaling by the cone constant
        let mut theta = lon_deg * DEG_TO_RAD - self.olon;
        if theta > PI {
            theta -= 2.0 * PI;
        }
        if theta < -PI {
            theta += 2.0 * PI;
        }
        theta *= self.sn;

        let x = ra * theta.sin() + self.xo;
        let y = self.ro - ra * theta.cos() + self.yo;

        (x, y)
    }

    /// Project geographic coordinates (degrees) to the grid cell containing them.
    ///
    /// No range validation is done; any coordinate with a finite projection
    /// yields a cell, even far outside the published grid.
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> Result<GridCell, ProjectionError> {
        let (x, y) = self.geo_to_grid(lat_deg, lon_deg);
        let x = x + 0.5;
        let y = y + 0.5;

        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::NonFinite {
                latitude: lat_deg,
                longitude: lon_deg,
            });
        }

        // `as` truncates toward zero, matching the publisher's integer cast
        Ok(GridCell::new(x as i32, y as i32))
    }

    /// Convert grid coordinates back to geographic coordinates (degrees).
    ///
    /// Returns (lat, lon).
    pub fn grid_to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let xn = x - self.xo;
        let yn = self.ro - y + self.yo;

        let mut ra = (xn * xn + yn * yn).sqrt();
        if self.sn < 0.0 {
            ra = -ra;
        }

        let lat = 2.0 * (self.re * self.sf / ra).powf(1.0 / self.sn).atan() - PI * 0.5;

        let theta = if xn.abs() <= 0.0 {
            0.0
        } else if yn.abs() <= 0.0 {
            if xn < 0.0 {
                -PI * 0.5
            } else {
                PI * 0.5
            }
        } else {
            xn.atan2(yn)
        };

        let lon = theta / self.sn + self.olon;

        (lat * RAD_TO_DEG, lon * RAD_TO_DEG)
    }

    /// Geographic coordinates (degrees) of a cell's grid point.
    pub fn cell_center(&self, cell: GridCell) -> (f64, f64) {
        self.grid_to_geo(cell.x as f64, cell.y as f64)
    }
}

impl Default for LambertConformal {
    fn default() -> Self {
        Self::kma_dfs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_reference_point_maps_to_origin_offset() {
        let proj = LambertConformal::kma_dfs();

        let (x, y) = proj.geo_to_grid(38.0, 126.0);
        assert_approx_eq!(x, 43.0, 1e-9);
        assert_approx_eq!(y, 136.0, 1e-9);
        assert_eq!(proj.project(38.0, 126.0).unwrap(), GridCell::new(43, 136));
    }

    #[test]
    fn test_seoul_city_hall() {
        let proj = LambertConformal::kma_dfs();
        assert_eq!(proj.project(37.5665, 126.9780).unwrap(), GridCell::new(60, 127));
    }

    #[test]
    fn test_seodaemun_truncates_not_rounds() {
        // Raw x is ~59.13; with the +0.5 offset it is ~59.63 and truncates to 59
        let proj = LambertConformal::kma_dfs();
        let (x, _) = proj.geo_to_grid(37.5798, 126.9388);
        assert!(x + 0.5 > 59.5 && x + 0.5 < 60.0, "x + 0.5 = {}", x + 0.5);
        assert_eq!(proj.project(37.5798, 126.9388).unwrap(), GridCell::new(59, 127));
    }

    #[test]
    fn test_other_cities() {
        let proj = LambertConformal::kma_dfs();
        // Jeju
        assert_eq!(proj.project(33.4996, 126.5312).unwrap(), GridCell::new(53, 38));
        // Busan
        assert_eq!(proj.project(35.1796, 129.0756).unwrap(), GridCell::new(98, 76));
        // Incheon
        assert_eq!(proj.project(37.4563, 126.7052).unwrap(), GridCell::new(55, 124));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let proj = LambertConformal::kma_dfs();
        let first = proj.project(35.8714, 128.6014).unwrap();
        for _ in 0..100 {
            assert_eq!(proj.project(35.8714, 128.6014).unwrap(), first);
        }
        assert_eq!(LambertConformal::kma_dfs().project(35.8714, 128.6014).unwrap(), first);
    }

    #[test]
    fn test_out_of_range_still_projects() {
        let proj = LambertConformal::kma_dfs();
        assert!(proj.project(0.0, 0.0).is_ok());
        assert!(proj.project(90.0, 126.0).is_ok());
        assert!(proj.project(51.5, -0.12).is_ok());
    }

    #[test]
    fn test_non_finite_projection_is_an_error() {
        let proj = LambertConformal::kma_dfs();
        assert!(matches!(
            proj.project(f64::NAN, 126.0),
            Err(ProjectionError::NonFinite { .. })
        ));
        assert!(proj.project(37.5, f64::INFINITY).is_err());
        // South pole is the cone's singular point
        assert!(proj.project(-90.0, 127.0).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let proj = LambertConformal::kma_dfs();

        let (lat, lon) = proj.grid_to_geo(60.0, 127.0);
        let (x, y) = proj.geo_to_grid(lat, lon);

        assert_approx_eq!(x, 60.0, 1e-6);
        assert_approx_eq!(y, 127.0, 1e-6);
    }

    #[test]
    fn test_cell_center_is_near_input() {
        let proj = LambertConformal::kma_dfs();
        let cell = proj.project(37.5665, 126.9780).unwrap();
        let (lat, lon) = proj.cell_center(cell);

        // 5 km cells: the grid point lies within a few hundredths of a degree
        assert!((lat - 37.5665).abs() < 0.05, "lat {}", lat);
        assert!((lon - 126.9780).abs() < 0.05, "lon {}", lon);
    }
}
