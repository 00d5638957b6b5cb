//! Map marker clustering request/response models

use serde::{Deserialize, Serialize};

use crate::services::marker_clustering::{BoundingBox, MAX_ZOOM, MarkerCluster};

pub const DEFAULT_ZOOM: u8 = 10;

/// Query parameters for GET /api/map/clusters
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterQuery {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    /// Map zoom level (default: 10, max: 20)
    pub zoom: Option<u8>,
}

impl ClusterQuery {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.west, self.south, self.east, self.north)
    }

    pub fn zoom(&self) -> u8 {
        self.zoom.unwrap_or(DEFAULT_ZOOM)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.zoom() > MAX_ZOOM {
            return Err(format!("zoom cannot exceed {}", MAX_ZOOM));
        }
        self.bounds().validate()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResponse {
    pub clusters: Vec<MarkerCluster>,
    /// Number of properties inside the viewport
    pub total: usize,
    pub zoom: u8,
}
