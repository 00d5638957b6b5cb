//! Process-wide shutdown signal
//!
//! A single ctrl-c listener flips a watch channel. The HTTP server and every
//! background job hold a receiver, so one SIGINT stops all of them.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub type ShutdownReceiver = watch::Receiver<bool>;

pub struct ShutdownTrigger(watch::Sender<bool>);

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.0.send_replace(true);
    }
}

pub fn channel() -> (ShutdownTrigger, ShutdownReceiver) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger(tx), rx)
}

/// Trigger shutdown on the first ctrl-c
pub fn trigger_on_ctrl_c(trigger: ShutdownTrigger) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                trigger.trigger();
            }
            Err(e) => {
                error!(error = %e, "Unable to listen for shutdown signal");
                // Keep the trigger alive so receivers never see a shutdown
                std::future::pending::<()>().await;
            }
        }
    })
}

/// Resolves once shutdown has been triggered or the trigger was dropped
pub async fn wait_for_shutdown(mut receiver: ShutdownReceiver) {
    let _ = receiver.wait_for(|stopped| *stopped).await;
}
