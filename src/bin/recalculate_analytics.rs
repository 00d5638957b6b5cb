use std::env;
use std::sync::Arc;
use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use realty_analytics_backend::config::AppConfig;
use realty_analytics_backend::services::analytics_repository::SeaOrmAnalyticsRepository;
use realty_analytics_backend::services::coefficients::CoefficientTables;
use realty_analytics_backend::services::investment_analytics::InvestmentAnalyticsService;

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

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: cargo run --bin recalculate_analytics <property_id>... | --stale");
        eprintln!("Example: cargo run --bin recalculate_analytics 12 15 40");
        std::process::exit(1);
    }

    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    let service = InvestmentAnalyticsService::new(
        Arc::new(SeaOrmAnalyticsRepository::new(db)),
        CoefficientTables::default(),
    )
    .with_ttl(chrono::Duration::hours(config.analytics_ttl_hours))
    .with_batch_concurrency(config.batch_concurrency);

    if args.iter().any(|a| a == "--stale") {
        let stats = service.refresh_stale_analytics().await?;
        tracing::info!(
            "Refreshed {} of {} stale properties ({} failed)",
            stats.refreshed,
            stats.candidates,
            stats.failed
        );
        return Ok(());
    }

    let property_ids: Vec<i32> = args
        .iter()
        .map(|a| a.parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|_| "Invalid property_id. Must be a number.")?;

    let results = service.batch_calculate_analytics(&property_ids).await;

    let mut failed = 0;
    for item in &results {
        match &item.result {
            Ok(row) => tracing::info!(
                "Property {}: rating {}, risk {}, strategy {}",
                item.property_id,
                row.investment_rating,
                row.risk_level,
                row.recommended_strategy
            ),
            Err(e) => {
                failed += 1;
                tracing::error!("Property {}: {}", item.property_id, e);
            }
        }
    }

    tracing::info!("✅ Recalculated {} properties ({} failed)", results.len() - failed, failed);
    Ok(())
}
