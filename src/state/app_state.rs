//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{AddOutcome, CollectionSnapshot, TimerCollection, TimerId};
use crate::{
    error::{Result, TimerError},
    input::DurationInput,
    services::Permission,
};

/// Owns the timer collection and publishes every change to subscribers
#[derive(Debug)]
pub struct AppState {
    timers: Mutex<TimerCollection>,
    permission: Mutex<Permission>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last user action and when it happened
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    /// Latest collection state for renderers
    pub snapshot_tx: watch::Sender<CollectionSnapshot>,
    /// One message per completed timer, in tick order
    pub completion_tx: broadcast::Sender<TimerId>,
}

impl AppState {
    /// Create a new AppState with an empty collection
    pub fn new(port: u16, host: String, max_timers: usize) -> Self {
        let timers = TimerCollection::with_max_timers(max_timers);
        let (snapshot_tx, _) = watch::channel(timers.snapshot());
        let (completion_tx, _) = broadcast::channel(100);

        Self {
            timers: Mutex::new(timers),
            permission: Mutex::new(Permission::Granted),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            snapshot_tx,
            completion_tx,
        }
    }

    fn lock_timers(&self) -> Result<MutexGuard<'_, TimerCollection>> {
        self.timers
            .lock()
            .map_err(|e| TimerError::StateUnavailable(format!("Failed to lock timer state: {}", e)))
    }

    /// Apply one operation to the collection and publish the new state.
    ///
    /// The snapshot is published while the lock is held so subscribers see
    /// states in the order they were produced.
    fn mutate<F, R>(&self, op: F) -> Result<(R, CollectionSnapshot)>
    where
        F: FnOnce(&mut TimerCollection) -> R,
    {
        let mut timers = self.lock_timers()?;
        let outcome = op(&mut timers);
        let snapshot = timers.snapshot();
        self.snapshot_tx.send_replace(snapshot.clone());
        drop(timers);

        Ok((outcome, snapshot))
    }

    fn apply<F, R>(&self, action: &str, op: F) -> Result<(R, CollectionSnapshot)>
    where
        F: FnOnce(&mut TimerCollection) -> R,
    {
        let result = self.mutate(op)?;
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }
        Ok(result)
    }

    /// Validate the input and append a new stopped timer
    pub fn add_timer(&self, input: &DurationInput) -> Result<(TimerId, CollectionSnapshot)> {
        let duration = input.resolve().inspect_err(|e| debug!("Rejected timer input: {}", e))?;

        match self.apply("add", |timers| timers.add(duration))? {
            (AddOutcome::Added(id), snapshot) => {
                if let Some(timer) = snapshot.timers.iter().find(|timer| timer.id == id) {
                    info!("Added timer {} ({})", id, timer);
                }
                Ok((id, snapshot))
            }
            (AddOutcome::LimitReached, snapshot) => {
                warn!("Timer limit of {} reached", snapshot.max_timers);
                Err(TimerError::LimitReached { max: snapshot.max_timers })
            }
        }
    }

    pub fn start_timer(&self, id: TimerId) -> Result<CollectionSnapshot> {
        self.apply_to_one("start", id, TimerCollection::start)
    }

    pub fn pause_timer(&self, id: TimerId) -> Result<CollectionSnapshot> {
        self.apply_to_one("pause", id, TimerCollection::pause)
    }

    /// Zero a single timer and stop it
    pub fn reset_timer(&self, id: TimerId) -> Result<CollectionSnapshot> {
        self.apply_to_one("reset", id, TimerCollection::reset)
    }

    fn apply_to_one(
        &self,
        action: &str,
        id: TimerId,
        op: fn(&mut TimerCollection, TimerId) -> bool,
    ) -> Result<CollectionSnapshot> {
        let (found, snapshot) = self.apply(action, |timers| op(timers, id))?;
        if found {
            info!("Timer {}: {}", id, action);
        } else {
            debug!("Ignoring {} for unknown timer {}", action, id);
        }
        Ok(snapshot)
    }

    /// Drop every timer and clear the limit notice
    pub fn reset_all(&self) -> Result<CollectionSnapshot> {
        let ((), snapshot) = self.apply("reset-all", TimerCollection::reset_all)?;
        info!("All timers cleared");
        Ok(snapshot)
    }

    /// Advance running timers by one second and announce completions
    pub fn tick(&self) -> Result<Vec<TimerId>> {
        let mut timers = self.lock_timers()?;
        let completed = timers.tick();
        self.snapshot_tx.send_replace(timers.snapshot());

        for id in &completed {
            info!("Timer {} finished", id);
            if self.completion_tx.send(*id).is_err() {
                debug!("No completion subscribers for timer {}", id);
            }
        }
        drop(timers);

        Ok(completed)
    }

    /// Latest published collection state
    pub fn snapshot(&self) -> CollectionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<CollectionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn subscribe_completions(&self) -> broadcast::Receiver<TimerId> {
        self.completion_tx.subscribe()
    }

    /// Record the notification permission probed at startup
    pub fn set_permission(&self, permission: Permission) {
        if let Ok(mut current) = self.permission.lock() {
            *current = permission;
        }
        if permission == Permission::Denied {
            warn!("{}", TimerError::PermissionDenied);
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
            .lock()
            .map(|permission| *permission)
            .unwrap_or(Permission::Denied)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|last| last.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Preset;

    fn state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), 5)
    }

    fn custom(text: &str) -> DurationInput {
        DurationInput::Custom(text.to_string())
    }

    #[test]
    fn invalid_input_leaves_collection_alone() {
        let state = state();
        for text in ["-5", "abc", ""] {
            assert!(matches!(state.add_timer(&custom(text)), Err(TimerError::InvalidInput(_))));
        }
        assert!(state.snapshot().timers.is_empty());
        assert_eq!(state.get_last_action(), (None, None));
    }

    #[test]
    fn limit_reached_is_published() {
        let state = AppState::new(0, "127.0.0.1".to_string(), 1);
        state.add_timer(&DurationInput::Preset(Preset::FiveMinutes)).unwrap();

        let err = state.add_timer(&custom("10")).unwrap_err();
        assert_eq!(err, TimerError::LimitReached { max: 1 });
        assert!(state.snapshot().limit_reached);

        let snapshot = state.reset_all().unwrap();
        assert!(snapshot.timers.is_empty());
        assert!(!snapshot.limit_reached);
    }

    #[test]
    fn tick_broadcasts_completions() {
        let state = state();
        let mut completions = state.subscribe_completions();
        let (id, _) = state.add_timer(&custom("1")).unwrap();
        state.start_timer(id).unwrap();

        assert!(state.tick().unwrap().is_empty());
        assert_eq!(state.tick().unwrap(), vec![id]);
        assert_eq!(completions.try_recv().unwrap(), id);

        assert!(state.tick().unwrap().is_empty());
        assert!(completions.try_recv().is_err());
    }

    #[test]
    fn subscribers_see_latest_snapshot() {
        let state = state();
        let mut snapshots = state.subscribe_snapshots();
        let (id, _) = state.add_timer(&custom("5")).unwrap();

        assert!(snapshots.has_changed().unwrap());
        let latest = snapshots.borrow_and_update().clone();
        assert_eq!(latest.timers.len(), 1);
        assert_eq!(latest.timers[0].id, id);
    }

    #[test]
    fn unknown_id_still_returns_snapshot() {
        let state = state();
        let snapshot = state.start_timer(42).unwrap();
        assert!(snapshot.timers.is_empty());
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[test]
    fn permission_defaults_to_granted() {
        let state = state();
        assert_eq!(state.permission(), Permission::Granted);
        state.set_permission(Permission::Denied);
        assert_eq!(state.permission(), Permission::Denied);
    }
}
