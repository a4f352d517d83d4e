//! Run notifications. Delivery channels (mail, chat webhooks, bots) live
//! outside this crate; a `Notifier` is the seam they plug into.
//!
//! Delivery failures are logged and never change the run's outcome.

mod command;
mod status;

pub use command::CommandNotifier;
pub use status::StatusFileNotifier;

use crate::config::NotifyConfig;
use crate::logger::Logger;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// A file the channel may attach (usually the run log).
    pub attachment: Option<PathBuf>,
    /// Structured run data for machine consumers.
    pub payload: Option<serde_json::Value>,
}

impl Notification {
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            attachment: None,
            payload: None,
        }
    }

    #[must_use]
    pub fn attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachment = Some(path.into());
        self
    }

    #[must_use]
    pub fn payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

pub trait Notifier: Send + Sync {
    /// Short channel name for log lines.
    fn name(&self) -> &str;

    /// # Errors
    /// The channel could not deliver the notification.
    fn notify(&self, notification: &Notification) -> Result<(), crate::Error>;
}

/// Sends to every channel, logging failures instead of returning them.
/// Returns how many channels accepted the notification.
pub fn dispatch(notifiers: &[Box<dyn Notifier>], notification: &Notification, logger: &Logger) -> usize {
    let mut delivered = 0;
    for notifier in notifiers {
        match notifier.notify(notification) {
            Ok(()) => {
                logger.debug("NOTIFY", &format!("Delivered via {}", notifier.name()));
                delivered += 1;
            }
            Err(e) => {
                logger.warn("NOTIFY", &format!("{} failed: {e}", notifier.name()));
            }
        }
    }
    delivered
}

/// Channels enabled in `[notify]`. Empty when notifications are disabled.
#[must_use]
pub fn from_config(config: &NotifyConfig) -> Vec<Box<dyn Notifier>> {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if !config.enabled {
        return notifiers;
    }

    if let Some(path) = &config.status_file {
        let expanded = shellexpand::tilde(path);
        notifiers.push(Box::new(StatusFileNotifier::new(expanded.as_ref())));
    }
    if let Some(command) = config.command.as_deref().filter(|c| !c.trim().is_empty()) {
        notifiers.push(Box::new(CommandNotifier::new(command)));
    }
    notifiers
}
