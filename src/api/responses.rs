//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::TimerError,
    input::{DurationInput, Preset},
    services::Permission,
    state::{CollectionSnapshot, TimerId},
};

/// Body of `POST /timers`: either free-form `duration` or a `preset`.
///
/// `duration` may be a JSON string or number; both go through the same
/// validation as typed-in text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTimerRequest {
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub preset: Option<u64>,
}

impl AddTimerRequest {
    pub fn into_input(self) -> Result<DurationInput, TimerError> {
        match (self.duration, self.preset) {
            (None, Some(seconds)) => Preset::try_from(seconds)
                .map(DurationInput::Preset)
                .map_err(TimerError::InvalidInput),
            (Some(Value::String(text)), None) => Ok(DurationInput::Custom(text)),
            (Some(Value::Number(number)), None) => Ok(DurationInput::Custom(number.to_string())),
            (Some(other), None) => Err(TimerError::InvalidInput(format!(
                "{} is not a number of seconds",
                other
            ))),
            (None, None) => Err(TimerError::InvalidInput("enter a time in seconds".to_string())),
            (Some(_), Some(_)) => Err(TimerError::InvalidInput(
                "give either a duration or a preset, not both".to_string(),
            )),
        }
    }
}

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_id: Option<TimerId>,
    pub timers: CollectionSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, timers: CollectionSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer_id: None,
            timers,
        }
    }

    pub fn ok(message: String, timers: CollectionSnapshot) -> Self {
        Self::new("ok", message, timers)
    }

    /// Response for a newly added timer
    pub fn added(id: TimerId, timers: CollectionSnapshot) -> Self {
        Self {
            timer_id: Some(id),
            ..Self::new("added", format!("Timer {} added", id), timers)
        }
    }

    pub fn invalid_input(message: String, timers: CollectionSnapshot) -> Self {
        Self::new("invalid_input", message, timers)
    }

    pub fn limit_reached(message: String, timers: CollectionSnapshot) -> Self {
        Self::new("limit_reached", message, timers)
    }
}

/// Error body when no snapshot could be produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// One entry of `GET /presets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetResponse {
    pub label: String,
    pub seconds: u64,
}

impl From<Preset> for PresetResponse {
    fn from(preset: Preset) -> Self {
        Self {
            label: preset.label().to_string(),
            seconds: preset.seconds(),
        }
    }
}

/// Status response with timers and notifier state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timers: CollectionSnapshot,
    pub notifications: Permission,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(body: &str) -> Result<DurationInput, TimerError> {
        serde_json::from_str::<AddTimerRequest>(body).unwrap().into_input()
    }

    #[test]
    fn add_request_accepts_preset_text_or_number() {
        assert_eq!(input(r#"{"preset": 600}"#), Ok(DurationInput::Preset(Preset::TenMinutes)));
        assert_eq!(input(r#"{"duration": "abc"}"#), Ok(DurationInput::Custom("abc".to_string())));
        assert_eq!(input(r#"{"duration": 5}"#), Ok(DurationInput::Custom("5".to_string())));
        assert_eq!(input(r#"{"duration": -5}"#), Ok(DurationInput::Custom("-5".to_string())));
    }

    #[test]
    fn malformed_add_requests_are_invalid_input() {
        for body in [
            r#"{"preset": 42}"#,
            r#"{}"#,
            r#"{"duration": true}"#,
            r#"{"duration": null}"#,
            r#"{"duration": "5", "preset": 300}"#,
        ] {
            assert!(matches!(input(body), Err(TimerError::InvalidInput(_))), "{body}");
        }
    }

    #[test]
    fn negative_number_fails_validation() {
        let resolved = input(r#"{"duration": -5}"#).unwrap().resolve();
        assert!(matches!(resolved, Err(TimerError::InvalidInput(_))));
    }
}
