//! Viewport filtering and grid clustering of map markers
//!
//! Keeps large point sets interactive: points outside the viewport are
//! dropped, the rest are bucketed into square cells whose size shrinks as
//! the zoom level grows. Cells are anchored to absolute coordinates so a
//! marker does not jump between clusters while the map is panned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::investment_rating::InvestmentRating;
use super::number_format::round_to_i64;

/// Grid cells per map tile edge
pub const GRID_DIVISIONS: f64 = 8.0;

pub const MAX_ZOOM: u8 = 20;

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("west", self.west), ("east", self.east)] {
            if !(-180.0..=180.0).contains(&value) {
                return Err(format!("{} must be between -180 and 180", name));
            }
        }
        for (name, value) in [("south", self.south), ("north", self.north)] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(format!("{} must be between -90 and 90", name));
            }
        }
        if self.south > self.north {
            return Err("south must be less than or equal to north".to_string());
        }
        Ok(())
    }

    /// A box with west > east crosses the antimeridian
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        if latitude < self.south || latitude > self.north {
            return false;
        }
        if self.crosses_antimeridian() {
            longitude >= self.west || longitude <= self.east
        } else {
            longitude >= self.west && longitude <= self.east
        }
    }
}

/// A property as shown on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPoint {
    pub property_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub price: Decimal,
    /// Rating from the latest analytics, if any were calculated
    pub investment_rating: Option<InvestmentRating>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerCluster {
    /// Centroid of member points
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
    pub property_ids: Vec<i32>,
    pub average_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_rating: Option<InvestmentRating>,
}

impl MarkerCluster {
    pub fn is_single(&self) -> bool {
        self.count == 1
    }
}

/// Cell edge length in degrees for a zoom level
pub fn cell_size_degrees(zoom: u8) -> f64 {
    let zoom = zoom.min(MAX_ZOOM);
    360.0 / 2f64.powi(zoom as i32) / GRID_DIVISIONS
}

fn cell_key(point: &MarkerPoint, cell_size: f64) -> (i64, i64) {
    (
        (point.longitude / cell_size).floor() as i64,
        (point.latitude / cell_size).floor() as i64,
    )
}

/// Cluster the points inside `bounds`
///
/// Output is sorted by member count (descending), then by cell, so equal
/// inputs always produce equal outputs.
pub fn cluster_markers(
    points: &[MarkerPoint],
    bounds: &BoundingBox,
    zoom: u8,
) -> Vec<MarkerCluster> {
    let cell_size = cell_size_degrees(zoom);

    let mut cells: BTreeMap<(i64, i64), Vec<&MarkerPoint>> = BTreeMap::new();
    for point in points
        .iter()
        .filter(|p| bounds.contains(p.latitude, p.longitude))
    {
        cells.entry(cell_key(point, cell_size)).or_default().push(point);
    }

    let mut clusters: Vec<((i64, i64), MarkerCluster)> = cells
        .into_iter()
        .map(|(key, members)| (key, build_cluster(&members)))
        .collect();

    clusters.sort_by(|(key_a, a), (key_b, b)| b.count.cmp(&a.count).then(key_a.cmp(key_b)));

    tracing::debug!(
        zoom = zoom,
        cell_size = cell_size,
        clusters = clusters.len(),
        "Clustered map markers"
    );

    clusters.into_iter().map(|(_, cluster)| cluster).collect()
}

fn build_cluster(members: &[&MarkerPoint]) -> MarkerCluster {
    let count = members.len();
    let latitude = members.iter().map(|p| p.latitude).sum::<f64>() / count as f64;
    let longitude = members.iter().map(|p| p.longitude).sum::<f64>() / count as f64;
    let total_price: Decimal = members.iter().map(|p| p.price).sum();

    let mut property_ids: Vec<i32> = members.iter().map(|p| p.property_id).collect();
    property_ids.sort_unstable();

    MarkerCluster {
        latitude,
        longitude,
        count,
        property_ids,
        average_price: round_to_i64(total_price / Decimal::from(count)),
        best_rating: members.iter().filter_map(|p| p.investment_rating).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(
        id: i32,
        latitude: f64,
        longitude: f64,
        rating: Option<InvestmentRating>,
    ) -> MarkerPoint {
        MarkerPoint {
            property_id: id,
            latitude,
            longitude,
            price: dec!(10000000),
            investment_rating: rating,
        }
    }

    const MOSCOW: BoundingBox = BoundingBox::new(37.0, 55.0, 38.5, 56.2);

    #[test]
    fn test_drops_points_outside_viewport() {
        let points = vec![
            point(1, 55.75, 37.61, None),
            point(2, 59.93, 30.31, None), // Saint Petersburg
        ];

        let clusters = cluster_markers(&points, &MOSCOW, 10);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].property_ids, vec![1]);
        assert!(clusters[0].is_single());
    }

    #[test]
    fn test_low_zoom_merges_nearby_points() {
        let points = vec![
            point(1, 55.75, 37.61, Some(InvestmentRating::B)),
            point(2, 55.76, 37.62, Some(InvestmentRating::A)),
            point(3, 55.74, 37.60, None),
        ];

        let clusters = cluster_markers(&points, &MOSCOW, 4);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 3);
        assert_eq!(clusters[0].property_ids, vec![1, 2, 3]);
        assert_eq!(clusters[0].best_rating, Some(InvestmentRating::A));
        assert_eq!(clusters[0].average_price, 10000000);
        assert!((clusters[0].latitude - 55.75).abs() < 1e-9);
    }

    #[test]
    fn test_high_zoom_splits_points() {
        let points = vec![point(1, 55.75, 37.61, None), point(2, 55.90, 38.20, None)];

        let clusters = cluster_markers(&points, &MOSCOW, 16);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(MarkerCluster::is_single));
    }

    #[test]
    fn test_in_bounds_count_is_conserved() {
        let points: Vec<MarkerPoint> = (0..100)
            .map(|i| point(i, 55.0 + (i as f64) * 0.012, 37.0 + (i as f64) * 0.015, None))
            .collect();

        let clusters = cluster_markers(&points, &MOSCOW, 9);
        let total: usize = clusters.iter().map(|c| c.count).sum();
        let expected = points
            .iter()
            .filter(|p| MOSCOW.contains(p.latitude, p.longitude))
            .count();
        assert_eq!(total, expected);
        assert!(clusters.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_antimeridian_bounds() {
        let chukotka = BoundingBox::new(170.0, 60.0, -170.0, 70.0);
        assert!(chukotka.crosses_antimeridian());
        assert!(chukotka.contains(65.0, 178.0));
        assert!(chukotka.contains(65.0, -175.0));
        assert!(!chukotka.contains(65.0, 0.0));
    }

    #[test]
    fn test_bounds_validation() {
        assert!(MOSCOW.validate().is_ok());
        assert!(BoundingBox::new(-200.0, 0.0, 10.0, 10.0).validate().is_err());
        assert!(BoundingBox::new(0.0, 20.0, 10.0, 10.0).validate().is_err());
    }

    #[test]
    fn test_cell_size_halves_per_zoom() {
        assert_eq!(cell_size_degrees(0), 45.0);
        assert_eq!(cell_size_degrees(1), 22.5);
        assert_eq!(cell_size_degrees(200), cell_size_degrees(MAX_ZOOM));
    }
}
