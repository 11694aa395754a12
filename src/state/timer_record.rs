//! Timer record structure

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier handed out by the collection, unique for the whole session
pub type TimerId = u64;

/// A single countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    pub id: TimerId,
    pub remaining_seconds: u64,
    pub running: bool,
}

/// What a single tick did to one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEffect {
    Unchanged,
    Decremented,
    Completed,
}

impl TimerRecord {
    /// Create a stopped timer with the given duration
    pub fn new(id: TimerId, remaining_seconds: u64) -> Self {
        Self {
            id,
            remaining_seconds,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Zero the countdown and stop it. The original duration is not kept.
    pub fn reset(&mut self) {
        self.remaining_seconds = 0;
        self.running = false;
    }

    /// Advance by one second
    pub fn tick(&mut self) -> TickEffect {
        match (self.running, self.remaining_seconds) {
            (true, 0) => {
                self.running = false;
                TickEffect::Completed
            }
            (true, _) => {
                self.remaining_seconds -= 1;
                TickEffect::Decremented
            }
            (false, _) => TickEffect::Unchanged,
        }
    }
}

impl fmt::Display for TimerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timer: {}s", self.remaining_seconds)
    }
}
