//! Delivers timer completions to the notifier

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    services::{Notifier, Permission},
    state::{AppState, TimerId},
};

/// Background task that forwards every completion on `completion_rx` to
/// `notifier`.
///
/// Subscribe the receiver before the clock starts; anything broadcast before
/// subscribing is never seen here.
///
/// Each notification runs in its own task and is never awaited here, so a slow
/// or failing notifier cannot hold up the clock. Completions are dropped when
/// notification permission was denied.
pub async fn completion_dispatch_task(
    state: Arc<AppState>,
    mut completion_rx: broadcast::Receiver<TimerId>,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationToken,
) {
    info!("Starting completion dispatch task");

    loop {
        let id = tokio::select! {
            _ = cancel.cancelled() => break,
            received = completion_rx.recv() => match received {
                Ok(id) => id,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Completion dispatch lagged, {} notifications skipped", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
        };

        if state.permission() == Permission::Denied {
            debug!("Notifications not permitted, dropping completion of timer {}", id);
            continue;
        }

        let notifier = Arc::clone(&notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify_completion(id).await {
                warn!("Failed to notify completion of timer {}: {}", id, e);
            }
        });
    }

    info!("Completion dispatch task stopped");
}
