//! Completion notifiers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    error::{Result, TimerError},
    state::TimerId,
};

pub const NOTIFICATION_TITLE: &str = "Timer Finished";

/// Whether completions may be announced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
}

/// Body text shown for a finished timer
pub fn notification_body(id: TimerId) -> String {
    format!("Timer {} has reached zero!", id)
}

/// Something that can announce a finished timer
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Probe once at startup whether notifications can be shown
    async fn request_permission(&self) -> Permission;

    /// Best-effort announcement of a completed timer
    async fn notify_completion(&self, id: TimerId) -> Result<()>;
}

/// Desktop notifications through `notify-send`
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    program: String,
    sound: bool,
}

impl DesktopNotifier {
    pub fn new(sound: bool) -> Self {
        Self::with_program("notify-send", sound)
    }

    pub fn with_program(program: impl Into<String>, sound: bool) -> Self {
        Self {
            program: program.into(),
            sound,
        }
    }

    fn args(&self, id: TimerId) -> Vec<String> {
        let mut args = vec!["--app-name=countdown-deck".to_string()];
        if self.sound {
            args.push("--hint=string:sound-name:complete".to_string());
        }
        args.push(NOTIFICATION_TITLE.to_string());
        args.push(notification_body(id));
        args
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn request_permission(&self) -> Permission {
        match Command::new(&self.program).arg("--version").output().await {
            Ok(output) if output.status.success() => {
                info!("{} is available", self.program);
                Permission::Granted
            }
            Ok(output) => {
                debug!("{} --version exited with {}", self.program, output.status);
                Permission::Denied
            }
            Err(e) => {
                debug!("Failed to execute {}: {}", self.program, e);
                Permission::Denied
            }
        }
    }

    async fn notify_completion(&self, id: TimerId) -> Result<()> {
        debug!("Sending desktop notification for timer {}", id);

        let output = Command::new(&self.program)
            .args(self.args(id))
            .output()
            .await
            .map_err(|e| TimerError::NotificationFailed(format!("Failed to execute {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TimerError::NotificationFailed(format!("{} failed: {}", self.program, stderr)));
        }

        Ok(())
    }
}

/// Writes completions to the log instead of the desktop
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn notify_completion(&self, id: TimerId) -> Result<()> {
        info!("{}: {}", NOTIFICATION_TITLE, notification_body(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_names_the_timer() {
        assert_eq!(notification_body(4), "Timer 4 has reached zero!");
    }

    #[test]
    fn sound_adds_hint() {
        let quiet = DesktopNotifier::new(false).args(1);
        let loud = DesktopNotifier::new(true).args(1);

        assert!(!quiet.iter().any(|a| a.contains("sound-name")));
        assert!(loud.iter().any(|a| a.contains("sound-name")));
        assert_eq!(loud.last().map(String::as_str), Some("Timer 1 has reached zero!"));
    }

    #[tokio::test]
    async fn missing_program_means_denied() {
        let notifier = DesktopNotifier::with_program("countdown-deck-no-such-binary", false);
        assert_eq!(notifier.request_permission().await, Permission::Denied);
        assert!(matches!(
            notifier.notify_completion(1).await,
            Err(TimerError::NotificationFailed(_))
        ));
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        assert_eq!(LogNotifier.request_permission().await, Permission::Granted);
        assert!(LogNotifier.notify_completion(9).await.is_ok());
    }
}
