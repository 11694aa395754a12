//! Countdown Deck - a local multi-timer service
//!
//! Keeps up to a fixed number of independent countdowns, advances them on a
//! one-second clock and announces each one once when it finishes. Timers are
//! controlled over a small HTTP API.

pub mod config;
pub mod error;
pub mod input;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerCollection};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
