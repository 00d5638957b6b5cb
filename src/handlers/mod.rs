pub mod health;
pub mod investment_analytics;
pub mod map;

use axum::{Json, http::StatusCode};
use tracing::error;

use crate::models::error::ErrorResponse;
use crate::services::investment_analytics::AnalyticsError;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ),
            AnalyticsError::Database(_) => {
                error!(error = %err, "Analytics request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: err.to_string(),
                    }),
                )
            }
        }
    }
}
