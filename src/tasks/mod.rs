//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod clock;
pub mod completion_dispatch;

// Re-export main functions
pub use clock::clock_task;
pub use completion_dispatch::completion_dispatch_task;
