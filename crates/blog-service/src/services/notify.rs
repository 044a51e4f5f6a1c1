//! Notification sinks
//!
//! Notifications are fire-and-forget: a sink never blocks and never fails the
//! operation that raised it.

use blog_core::Notifier;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A dismissible toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        tracing::error!(notification = %message, "Error notification");
    }

    fn notify_success(&self, message: &str) {
        tracing::info!(notification = %message, "Success notification");
    }
}

/// Forwards notifications to a UI over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end for the UI
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn push(&self, level: NotificationLevel, message: &str) {
        if self.tx.send(Notification::new(level, message)).is_err() {
            tracing::debug!(notification = %message, "Notification dropped, no receiver");
        }
    }
}

impl Notifier for ChannelNotifier {
    fn notify_error(&self, message: &str) {
        self.push(NotificationLevel::Error, message);
    }

    fn notify_success(&self, message: &str) {
        self.push(NotificationLevel::Success, message);
    }
}
