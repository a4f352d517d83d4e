//! Shell hook channel. The configured command runs under `sh -c` with the
//! notification in `WP_PRUNE_*` environment variables, so existing mail,
//! webhook or bot scripts can be reused unchanged.
//!
//! The JSON result lists every deleted path and can outgrow the environment
//! limit, so it goes to a temp file named by `WP_PRUNE_RESULT_FILE`. The file
//! is removed once the hook exits.

use super::{Notification, Notifier};
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct CommandNotifier {
    command: String,
}

impl CommandNotifier {
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn build(&self, notification: &Notification) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(&self.command)
            .env("WP_PRUNE_SEVERITY", notification.severity.as_str())
            .env("WP_PRUNE_TITLE", &notification.title)
            .env("WP_PRUNE_MESSAGE", &notification.message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if let Some(path) = &notification.attachment {
            cmd.env("WP_PRUNE_ATTACHMENT", path);
        }
        cmd
    }

    fn write_payload(notification: &Notification) -> Result<Option<NamedTempFile>, crate::Error> {
        let Some(payload) = &notification.payload else {
            return Ok(None);
        };
        let mut file = tempfile::Builder::new()
            .prefix("wp-prune-result-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(&mut file, payload)
            .map_err(|e| crate::Error::Format(format!("JSON serialization failed: {e}")))?;
        file.flush()?;
        Ok(Some(file))
    }
}

impl Notifier for CommandNotifier {
    fn name(&self) -> &str {
        "command"
    }

    fn notify(&self, notification: &Notification) -> Result<(), crate::Error> {
        let payload = Self::write_payload(notification)?;
        let mut cmd = self.build(notification);
        if let Some(file) = &payload {
            cmd.env("WP_PRUNE_RESULT_FILE", file.path());
        }
        let output = cmd.output()?;
        drop(payload);
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(crate::Error::Notify(format!(
            "hook exited with {}: {}",
            output.status,
            stderr.trim()
        )))
    }
}
