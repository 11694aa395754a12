//! External collaborators
//!
//! The timer engine only talks to the outside world through these. For now
//! that is the completion notifier.

pub mod notifier;

// Re-export main types
pub use notifier::{DesktopNotifier, LogNotifier, Notifier, Permission};
