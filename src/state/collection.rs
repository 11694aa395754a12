//! Timer collection and its state transitions
//!
//! `TimerCollection` is the whole engine: it owns the ordered list of timers
//! and applies add/start/pause/reset/tick to it. It does no I/O. Callers
//! (the store in `app_state`) take the ids returned by `tick` and hand them to
//! whatever announces completions.

use serde::{Deserialize, Serialize};

use super::timer_record::{TickEffect, TimerId, TimerRecord};

/// Default cap on the number of timers that may exist at once
pub const MAX_TIMERS: usize = 5;

/// Result of an add attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(TimerId),
    LimitReached,
}

/// Read-only view of the collection, published to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub timers: Vec<TimerRecord>,
    pub limit_reached: bool,
    pub max_timers: usize,
}

#[derive(Debug, Clone)]
pub struct TimerCollection {
    timers: Vec<TimerRecord>,
    max_timers: usize,
    next_id: TimerId,
    limit_reached: bool,
}

impl TimerCollection {
    /// Create an empty collection capped at `MAX_TIMERS`
    pub fn new() -> Self {
        Self::with_max_timers(MAX_TIMERS)
    }

    /// Create an empty collection with a custom cap
    pub fn with_max_timers(max_timers: usize) -> Self {
        Self {
            timers: Vec::with_capacity(max_timers),
            max_timers,
            next_id: 1,
            limit_reached: false,
        }
    }

    // Queries

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.timers.len() >= self.max_timers
    }

    pub fn max_timers(&self) -> usize {
        self.max_timers
    }

    /// Whether the last add was rejected and nothing has cleared the notice since
    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    pub fn get(&self, id: TimerId) -> Option<&TimerRecord> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimerRecord> {
        self.timers.iter()
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            timers: self.timers.clone(),
            limit_reached: self.limit_reached,
            max_timers: self.max_timers,
        }
    }

    // Commands

    /// Append a stopped timer, unless the collection is full
    pub fn add(&mut self, duration_seconds: u64) -> AddOutcome {
        if self.is_full() {
            self.limit_reached = true;
            return AddOutcome::LimitReached;
        }

        self.limit_reached = false;
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(TimerRecord::new(id, duration_seconds));
        AddOutcome::Added(id)
    }

    /// Returns false when no timer has this id
    pub fn start(&mut self, id: TimerId) -> bool {
        self.update(id, TimerRecord::start)
    }

    pub fn pause(&mut self, id: TimerId) -> bool {
        self.update(id, TimerRecord::pause)
    }

    /// Zeroes the timer rather than restoring its configured duration
    pub fn reset(&mut self, id: TimerId) -> bool {
        self.update(id, TimerRecord::reset)
    }

    /// Drop every timer. Ids keep counting up so they stay unique.
    pub fn reset_all(&mut self) {
        self.timers.clear();
        self.limit_reached = false;
    }

    /// Advance every running timer by one second.
    ///
    /// Returns the ids that completed on this tick, in collection order. A
    /// timer completes on the tick after it reaches zero, and only once.
    pub fn tick(&mut self) -> Vec<TimerId> {
        self.timers
            .iter_mut()
            .filter_map(|timer| match timer.tick() {
                TickEffect::Completed => Some(timer.id),
                TickEffect::Decremented | TickEffect::Unchanged => None,
            })
            .collect()
    }

    fn update<F>(&mut self, id: TimerId, updater: F) -> bool
    where
        F: FnOnce(&mut TimerRecord),
    {
        match self.timers.iter_mut().find(|timer| timer.id == id) {
            Some(timer) => {
                updater(timer);
                true
            }
            None => false,
        }
    }
}

impl Default for TimerCollection {
    fn default() -> Self {
        Self::new()
    }
}
