//! Configuration and CLI argument handling

use std::time::Duration;
use clap::{builder::TypedValueParser, Parser, ValueEnum};

use crate::state::MAX_TIMERS;

/// Which notifier announces finished timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierKind {
    /// Desktop notifications through notify-send
    Desktop,
    /// Log lines only
    Log,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-deck")]
#[command(about = "A local multi-timer service with countdown notifications")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Maximum number of timers that may exist at once
    #[arg(short, long, default_value_t = MAX_TIMERS, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    pub max_timers: usize,

    /// How finished timers are announced
    #[arg(short, long, value_enum, default_value = "desktop")]
    pub notifier: NotifierKind,

    /// Play a sound with each notification
    #[arg(short, long)]
    pub sound: bool,

    /// Clock period in milliseconds; every tick counts as one second
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-deck"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.max_timers, MAX_TIMERS);
        assert_eq!(config.notifier, NotifierKind::Desktop);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "countdown-deck", "--max-timers", "3", "--notifier", "log", "--sound", "--tick-ms", "50", "-v",
        ])
        .unwrap();
        assert_eq!(config.max_timers, 3);
        assert_eq!(config.notifier, NotifierKind::Log);
        assert!(config.sound);
        assert_eq!(config.tick_period(), Duration::from_millis(50));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(Config::try_parse_from(["countdown-deck", "--max-timers", "0"]).is_err());
        assert!(Config::try_parse_from(["countdown-deck", "--tick-ms", "0"]).is_err());
    }
}
