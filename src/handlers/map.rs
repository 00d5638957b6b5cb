//! Map Handlers
//!
//! GET /api/map/clusters: clustered property markers for a viewport.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::{info, warn};

use super::{ApiError, bad_request};
use crate::AppState;
use crate::models::map::{ClusterQuery, ClusterResponse};
use crate::services::investment_analytics::AnalyticsError;
use crate::services::marker_clustering::cluster_markers;

pub async fn get_map_clusters(
    State(state): State<AppState>,
    Query(query): Query<ClusterQuery>,
) -> Result<Json<ClusterResponse>, ApiError> {
    if let Err(e) = query.validate() {
        warn!(error = %e, "Invalid cluster query parameters");
        return Err(bad_request(e));
    }

    let bounds = query.bounds();
    let zoom = query.zoom();

    let points = state
        .analytics
        .repository()
        .find_properties_in_bounds(&bounds)
        .await
        .map_err(AnalyticsError::from)?;

    let clusters = cluster_markers(&points, &bounds, zoom);
    let total: usize = clusters.iter().map(|c| c.count).sum();

    info!(
        zoom = zoom,
        total = total,
        clusters = clusters.len(),
        "Map clusters returned"
    );

    Ok(Json(ClusterResponse {
        clusters,
        total,
        zoom,
    }))
}
