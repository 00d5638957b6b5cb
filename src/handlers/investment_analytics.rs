//! Investment Analytics Handlers
//!
//! - GET  /api/properties/{id}/analytics
//! - POST /api/properties/{id}/analytics/recalculate
//! - GET  /api/properties/{id}/analytics/history
//! - POST /api/analytics/batch

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::{info, warn};

use super::{ApiError, bad_request};
use crate::AppState;
use crate::models::investment_analytics::{
    AnalyticsHistoryQuery, AnalyticsHistoryResponse, BatchAnalyticsRequest,
    BatchAnalyticsResponse, InvestmentAnalyticsResponse,
};

/// Latest analytics for a property
///
/// Served from the newest stored row while it is within the TTL, otherwise
/// recalculated on the spot. Unknown property ids return 404.
pub async fn get_property_analytics(
    State(state): State<AppState>,
    Path(property_id): Path<i32>,
) -> Result<Json<InvestmentAnalyticsResponse>, ApiError> {
    info!(property_id = property_id, "Analytics request received");

    let analytics = state
        .analytics
        .get_analytics_by_property_id(property_id)
        .await?;

    Ok(Json(analytics.into()))
}

/// Force a new calculation regardless of the TTL
pub async fn recalculate_property_analytics(
    State(state): State<AppState>,
    Path(property_id): Path<i32>,
) -> Result<Json<InvestmentAnalyticsResponse>, ApiError> {
    info!(property_id = property_id, "Forced analytics recalculation");

    let analytics = state.analytics.calculate_full_analytics(property_id).await?;

    Ok(Json(analytics.into()))
}

pub async fn get_property_analytics_history(
    State(state): State<AppState>,
    Path(property_id): Path<i32>,
    Query(query): Query<AnalyticsHistoryQuery>,
) -> Result<Json<AnalyticsHistoryResponse>, ApiError> {
    if let Err(e) = query.validate() {
        warn!(error = %e, "Invalid history query parameters");
        return Err(bad_request(e));
    }

    let rows = state
        .analytics
        .get_analytics_history(property_id, query.limit)
        .await?;

    Ok(Json(AnalyticsHistoryResponse {
        property_id,
        items: rows.into_iter().map(Into::into).collect(),
    }))
}

/// Calculate analytics for many properties
///
/// Always 200 when the request itself is valid; failures are reported per
/// property in `results`.
pub async fn batch_calculate_analytics(
    State(state): State<AppState>,
    Json(request): Json<BatchAnalyticsRequest>,
) -> Result<Json<BatchAnalyticsResponse>, ApiError> {
    if let Err(e) = request.validate() {
        warn!(error = %e, "Invalid batch request");
        return Err(bad_request(e));
    }

    info!(count = request.property_ids.len(), "Batch analytics request received");

    let calculations = state
        .analytics
        .batch_calculate_analytics(&request.property_ids)
        .await;

    Ok(Json(BatchAnalyticsResponse::from_calculations(calculations)))
}
