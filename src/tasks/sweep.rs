//! Background Sweep Task
//!
//! Periodically removes expired entries from both caches, on top of the
//! lazy and threshold-triggered expiry the caches already do.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a task that sweeps every cache in `state` each `interval_secs`.
///
/// Returns `None` when `interval_secs` is zero. The returned handle is used
/// to abort the task during graceful shutdown.
pub fn spawn_sweep_task(state: AppState, interval_secs: u64) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        return None;
    }
    let interval = Duration::from_secs(interval_secs);

    Some(tokio::spawn(async move {
        info!(
            "Starting background sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let ai = state.ai.shared().sweep().await;
            let auth = state.auth.shared().sweep().await;

            if ai + auth > 0 {
                info!("Background sweep: removed {} ai, {} auth expired entries", ai, auth);
            } else {
                debug!("Background sweep: no expired entries found");
            }
        }
    }))
}
