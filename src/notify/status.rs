//! Append-only JSONL status file: one object per run, greppable and
//! `jq`-friendly, so dashboards can read run history without parsing logs.

use super::{Notification, Notifier, Severity};
use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use ulid::Ulid;

#[derive(Debug, Serialize)]
struct StatusEntry<'a> {
    /// Time-sortable and unique across concurrent writers.
    id: String,
    ts: String,
    severity: Severity,
    title: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct StatusFileNotifier {
    path: PathBuf,
}

impl StatusFileNotifier {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Notifier for StatusFileNotifier {
    fn name(&self) -> &str {
        "status-file"
    }

    fn notify(&self, notification: &Notification) -> Result<(), crate::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let entry = StatusEntry {
            id: Ulid::new().to_string(),
            ts: Local::now().to_rfc3339(),
            severity: notification.severity,
            title: &notification.title,
            message: &notification.message,
            attachment: notification
                .attachment
                .as_ref()
                .map(|p| p.display().to_string()),
            result: notification.payload.as_ref(),
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| crate::Error::Format(format!("JSON serialization failed: {e}")))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{json}")?;
        Ok(())
    }
}
