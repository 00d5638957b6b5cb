// src/lib.rs

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use services::investment_analytics::InvestmentAnalyticsService;

#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<InvestmentAnalyticsService>,
}

pub mod entities {
    pub mod prelude;
    pub mod infrastructure_projects;
    pub mod investment_analytics;
    pub mod price_history;
    pub mod properties;
    pub mod property_classes;
    pub mod regional_costs;
    pub mod regions;
}

pub mod services {
    pub mod number_format;
    pub mod coefficients;
    pub mod price_dynamics;
    pub mod rental_scenario;
    pub mod flip_scenario;
    pub mod safe_haven;
    pub mod price_forecast;
    pub mod investment_rating;
    pub mod analytics_repository;
    pub mod investment_analytics;
    pub mod marker_clustering;
}

pub mod config;
pub mod models;
pub mod handlers;
pub mod jobs;
pub mod shutdown;

/// All API routes with request tracing
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/properties/{id}/analytics",
            get(handlers::investment_analytics::get_property_analytics),
        )
        .route(
            "/api/properties/{id}/analytics/recalculate",
            post(handlers::investment_analytics::recalculate_property_analytics),
        )
        .route(
            "/api/properties/{id}/analytics/history",
            get(handlers::investment_analytics::get_property_analytics_history),
        )
        .route(
            "/api/analytics/batch",
            post(handlers::investment_analytics::batch_calculate_analytics),
        )
        .route("/api/map/clusters", get(handlers::map::get_map_clusters))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
