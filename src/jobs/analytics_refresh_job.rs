//! Analytics Refresh Job
//!
//! Periodically recalculates analytics for properties whose newest row is
//! missing or older than the TTL, so most reads hit a fresh row.
//! Stops when the process-wide shutdown signal fires.

use std::sync::Arc;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{error, info};

use crate::services::investment_analytics::InvestmentAnalyticsService;
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

/// Start the analytics refresh job
///
/// Spawns a background task that ticks every `interval_secs` and runs
/// `refresh_stale_analytics`. Failures are logged and retried on the next
/// tick.
pub fn start_analytics_refresh_job(
    service: Arc<InvestmentAnalyticsService>,
    interval_secs: u64,
    shutdown: ShutdownReceiver,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = interval_secs,
            ttl_hours = service.ttl().num_hours(),
            "Analytics refresh job started"
        );

        let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let stop = wait_for_shutdown(shutdown);
        tokio::pin!(stop);

        loop {
            tokio::select! {
                biased;
                _ = &mut stop => {
                    info!("Shutdown requested, stopping analytics refresh job");
                    break;
                }
                _ = ticker.tick() => {
                    match service.refresh_stale_analytics().await {
                        Ok(stats) => {
                            info!(
                                candidates = stats.candidates,
                                refreshed = stats.refreshed,
                                failed = stats.failed,
                                "Analytics refresh completed"
                            );
                        }
                        Err(e) => {
                            error!(error = %e, "Analytics refresh failed");
                        }
                    }
                }
            }
        }

        info!("Analytics refresh job stopped");
    })
}
