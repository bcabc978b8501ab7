//! Grouping of regions by the grid cell they project to.

use std::collections::HashMap;

use forecast_common::{GridCell, Region};
use projection::LambertConformal;
use tracing::debug;

/// Regions sharing one grid cell, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGroup {
    pub cell: GridCell,
    pub regions: Vec<Region>,
}

/// Output of [`group_regions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionGroups {
    /// One entry per distinct cell, ordered by first appearance
    pub groups: Vec<CellGroup>,
    /// Regions whose coordinates had no finite grid position
    pub unprojectable: Vec<Region>,
}

impl RegionGroups {
    /// Number of distinct cells, i.e. the number of upstream fetches needed.
    pub fn cell_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of regions across groups and failures.
    pub fn region_count(&self) -> usize {
        self.groups.iter().map(|g| g.regions.len()).sum::<usize>() + self.unprojectable.len()
    }
}

/// Project every region and bucket it by grid cell.
///
/// A region that fails to project is set aside in `unprojectable` and does
/// not stop the others from being grouped.
pub fn group_regions(regions: Vec<Region>, projection: &LambertConformal) -> RegionGroups {
    let mut groups: Vec<CellGroup> = Vec::new();
    let mut index: HashMap<GridCell, usize> = HashMap::new();
    let mut unprojectable = Vec::new();

    for region in regions {
        match projection.project(region.latitude, region.longitude) {
            Ok(cell) => match index.get(&cell) {
                Some(&slot) => groups[slot].regions.push(region),
                None => {
                    index.insert(cell, groups.len());
                    groups.push(CellGroup {
                        cell,
                        regions: vec![region],
                    });
                }
            },
            Err(e) => {
                debug!(code = %region.code, error = %e, "Region not projectable");
                unprojectable.push(region);
            }
        }
    }

    RegionGroups {
        groups,
        unprojectable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::points;

    #[test]
    fn test_same_cell_regions_share_a_group() {
        let proj = LambertConformal::kma_dfs();
        let regions = vec![
            points::SEOUL_CITY_HALL.region(),
            points::JEJU.region(),
            points::JONGNO.region(),
        ];

        let grouped = group_regions(regions, &proj);

        assert_eq!(grouped.cell_count(), 2);
        assert!(grouped.unprojectable.is_empty());
        assert_eq!(grouped.groups[0].cell, points::SEOUL_CITY_HALL.cell());
        let codes: Vec<_> = grouped.groups[0].regions.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["11140", "11110"]);
        assert_eq!(grouped.groups[1].cell, points::JEJU.cell());
    }

    #[test]
    fn test_groups_follow_first_appearance() {
        let proj = LambertConformal::kma_dfs();
        let regions = vec![
            points::BUSAN.region(),
            points::SEOUL_CITY_HALL.region(),
            points::BUSAN.region(),
        ];

        let grouped = group_regions(regions, &proj);
        let cells: Vec<_> = grouped.groups.iter().map(|g| g.cell).collect();
        assert_eq!(cells, vec![points::BUSAN.cell(), points::SEOUL_CITY_HALL.cell()]);
    }

    #[test]
    fn test_unprojectable_region_is_set_aside() {
        let proj = LambertConformal::kma_dfs();
        let regions = vec![
            Region::new("bad", f64::NAN, 127.0),
            points::JEJU.region(),
            Region::new("pole", -90.0, 127.0),
        ];

        let grouped = group_regions(regions, &proj);

        assert_eq!(grouped.cell_count(), 1);
        assert_eq!(grouped.unprojectable.len(), 2);
        assert_eq!(grouped.unprojectable[0].code, "bad");
        assert_eq!(grouped.region_count(), 3);
    }

    #[test]
    fn test_every_region_accounted_for() {
        let proj = LambertConformal::kma_dfs();
        let mut regions = Vec::new();
        for i in 0..50 {
            let lat = 33.0 + (i as f64) * 0.1;
            let lon = 126.0 + (i % 7) as f64 * 0.3;
            regions.push(Region::new(format!("r{i}"), lat, lon));
        }

        let grouped = group_regions(regions, &proj);
        assert_eq!(grouped.region_count(), 50);

        let mut cells: Vec<_> = grouped.groups.iter().map(|g| g.cell).collect();
        let before = cells.len();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), before);
    }

    #[test]
    fn test_empty_input() {
        let grouped = group_regions(Vec::new(), &LambertConformal::kma_dfs());
        assert_eq!(grouped, RegionGroups::default());
    }
}
