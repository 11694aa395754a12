//! State management module
//!
//! This module contains the timer engine and the store that owns it.

pub mod timer_record;
pub mod collection;
pub mod app_state;

// Re-export main types
pub use timer_record::{TimerId, TimerRecord};
pub use collection::{AddOutcome, CollectionSnapshot, TimerCollection, MAX_TIMERS};
pub use app_state::AppState;
