use chrono::Duration;
use realty_analytics_backend::{
    AppState, app_router,
    config::AppConfig,
    shutdown,
    jobs::analytics_refresh_job::start_analytics_refresh_job,
    services::{
        analytics_repository::SeaOrmAnalyticsRepository, coefficients::CoefficientTables,
        investment_analytics::InvestmentAnalyticsService,
    },
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,realty_analytics_backend=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    let (shutdown_trigger, shutdown_rx) = shutdown::channel();
    shutdown::trigger_on_ctrl_c(shutdown_trigger);

    let repository = Arc::new(SeaOrmAnalyticsRepository::new(db));
    let analytics = Arc::new(
        InvestmentAnalyticsService::new(repository, CoefficientTables::default())
            .with_ttl(Duration::hours(config.analytics_ttl_hours))
            .with_batch_concurrency(config.batch_concurrency),
    );

    if config.refresh_enabled {
        start_analytics_refresh_job(
            analytics.clone(),
            config.refresh_interval_secs,
            shutdown_rx.clone(),
        );
    } else {
        tracing::info!("Analytics refresh job disabled");
    }

    let mut app = app_router(AppState { analytics });
    if config.cors_allow_any {
        app = app.layer(CorsLayer::permissive());
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_shutdown(shutdown_rx))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
