//! Error types shared across the timer service

use thiserror::Error;

/// Every failure the service can report. None of them are fatal: each one is
/// surfaced to the caller or logged, and the clock keeps ticking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Free-form duration was empty, non-numeric or not positive
    #[error("Invalid duration: {0}")]
    InvalidInput(String),

    /// The collection is already at capacity
    #[error("You can only add up to {max} timers")]
    LimitReached { max: usize },

    /// Notification permission was not granted
    #[error("Permission required: Please enable notifications to receive timer alerts.")]
    PermissionDenied,

    /// A notification could not be delivered
    #[error("Notification failed: {0}")]
    NotificationFailed(String),

    /// The shared state lock was poisoned
    #[error("Timer state unavailable: {0}")]
    StateUnavailable(String),
}

pub type Result<T> = std::result::Result<T, TimerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_message_names_the_cap() {
        let err = TimerError::LimitReached { max: 5 };
        assert_eq!(err.to_string(), "You can only add up to 5 timers");
    }

    #[test]
    fn invalid_input_carries_reason() {
        let err = TimerError::InvalidInput("\"abc\" is not a number".to_string());
        assert!(err.to_string().contains("abc"));
    }
}
