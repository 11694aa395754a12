//! Once-per-second clock that drives the timers

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that ticks the collection every `period` until cancelled.
///
/// The first tick fires one full period after the task starts. Each tick
/// counts as exactly one second no matter how late it runs.
pub async fn clock_task(state: Arc<AppState>, period: Duration, cancel: CancellationToken) {
    info!("Starting clock task with a {:?} period", period);

    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Clock task cancelled");
                break;
            }
            _ = interval.tick() => {
                match state.tick() {
                    Ok(completed) if !completed.is_empty() => {
                        debug!("Tick completed timers {:?}", completed);
                    }
                    Ok(_) => {}
                    Err(e) => error!("Failed to tick timers: {}", e),
                }
            }
        }
    }
}
