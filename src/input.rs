//! Duration input: free-form text and one-tap presets

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimerError};

/// Fixed durations offered alongside free-form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Preset {
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::FiveMinutes, Preset::TenMinutes, Preset::FifteenMinutes];

    pub fn seconds(self) -> u64 {
        match self {
            Preset::FiveMinutes => 300,
            Preset::TenMinutes => 600,
            Preset::FifteenMinutes => 900,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::FiveMinutes => "5 min",
            Preset::TenMinutes => "10 min",
            Preset::FifteenMinutes => "15 min",
        }
    }
}

impl TryFrom<u64> for Preset {
    type Error = String;

    fn try_from(seconds: u64) -> std::result::Result<Self, Self::Error> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.seconds() == seconds)
            .ok_or_else(|| format!("{seconds} is not a preset duration (300, 600 or 900)"))
    }
}

impl From<Preset> for u64 {
    fn from(preset: Preset) -> Self {
        preset.seconds()
    }
}

/// A duration as the user supplied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationInput {
    Custom(String),
    Preset(Preset),
}

impl DurationInput {
    /// Turn the input into seconds. Presets are always valid.
    pub fn resolve(&self) -> Result<u64> {
        match self {
            DurationInput::Custom(text) => parse_duration(text),
            DurationInput::Preset(preset) => Ok(preset.seconds()),
        }
    }
}

/// Parse a free-form duration in whole seconds
pub fn parse_duration(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimerError::InvalidInput("enter a time in seconds".to_string()));
    }

    let seconds: i64 = trimmed
        .parse()
        .map_err(|_| TimerError::InvalidInput(format!("\"{trimmed}\" is not a whole number of seconds")))?;

    if seconds <= 0 {
        return Err(TimerError::InvalidInput(format!(
            "duration must be positive, got {seconds}"
        )));
    }

    Ok(seconds as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_seconds() {
        assert_eq!(parse_duration("90"), Ok(90));
        assert_eq!(parse_duration("  15 "), Ok(15));
    }

    #[test]
    fn rejects_bad_text() {
        for text in ["", "   ", "abc", "-5", "0", "1.5", "12abc"] {
            assert!(
                matches!(parse_duration(text), Err(TimerError::InvalidInput(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn presets_skip_validation() {
        assert_eq!(DurationInput::Preset(Preset::TenMinutes).resolve(), Ok(600));
        assert!(DurationInput::Custom("nope".to_string()).resolve().is_err());
    }

    #[test]
    fn presets_serialize_as_seconds() {
        let json = serde_json::to_string(&Preset::FifteenMinutes).unwrap();
        assert_eq!(json, "900");

        let preset: Preset = serde_json::from_str("300").unwrap();
        assert_eq!(preset, Preset::FiveMinutes);
        assert!(serde_json::from_str::<Preset>("301").is_err());
    }
}
