mod common;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use common::*;
use realty_analytics_backend::jobs::analytics_refresh_job::start_analytics_refresh_job;
use realty_analytics_backend::shutdown;

#[tokio::test]
async fn test_refresh_job_runs_then_stops_on_shutdown() {
    let repo = InMemoryRepository::with_reference_data();
    repo.add_reference_property(1);
    let (trigger, receiver) = shutdown::channel();

    let handle = start_analytics_refresh_job(Arc::new(build_service(&repo)), 3600, receiver);

    // First tick fires immediately
    timeout(Duration::from_secs(5), async {
        while repo.analytics_count(1) == 0 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    trigger.trigger();

    let stopped = timeout(Duration::from_secs(5), handle).await;
    assert!(stopped.is_ok(), "refresh job kept running after shutdown");
    assert_eq!(repo.analytics_count(1), 1);
}

#[tokio::test]
async fn test_refresh_job_exits_when_already_shut_down() {
    let repo = InMemoryRepository::with_reference_data();
    repo.add_reference_property(1);
    let (trigger, receiver) = shutdown::channel();
    trigger.trigger();

    let handle = start_analytics_refresh_job(Arc::new(build_service(&repo)), 3600, receiver);

    assert!(timeout(Duration::from_secs(5), handle).await.is_ok());
    assert_eq!(repo.analytics_count(1), 0);
}
