//! User-facing notifications for failures the user would otherwise miss.
//!
//! The launcher usually runs from a desktop URL handler with no terminal
//! attached, so a missing browser is reported through the desktop
//! notification service in addition to the log.

use crate::{Error, Result};

/// Urgency hint passed to the notification daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

pub trait Notifier {
    fn notify(&self, urgency: Urgency, summary: &str, body: &str) -> Result<()>;
}

/// Sends notifications through the desktop notification daemon
pub struct DesktopNotifier {
    timeout_ms: u32,
}

impl DesktopNotifier {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(3000)
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, urgency: Urgency, summary: &str, body: &str) -> Result<()> {
        use notify_rust::{Notification, Timeout};

        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(body)
            .timeout(Timeout::Milliseconds(self.timeout_ms));

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(match urgency {
            Urgency::Low => notify_rust::Urgency::Low,
            Urgency::Normal => notify_rust::Urgency::Normal,
            Urgency::Critical => notify_rust::Urgency::Critical,
        });

        notification
            .show()
            .map_err(|e| Error::Notification(e.to_string()))?;

        tracing::info!(
            "Notification urgency: [{:?}], summary: [{}], message: [{:?}]",
            urgency,
            summary,
            body
        );

        Ok(())
    }
}
