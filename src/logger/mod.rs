//! The run logger. Built once per process from config and passed by
//! reference into every component; there is no global logger.

mod builder;
mod from_config;

pub use builder::{FileBuilder, LoggerBuilder, TerminalBuilder};

use crate::level::Level;
use crate::output::{LogRecord, Output};
use std::path::PathBuf;

/// Immutable after build, so `&Logger` can be shared freely.
#[derive(Default)]
pub struct Logger {
    min_level: Level,
    outputs: Vec<Box<dyn Output>>,
    site: Option<String>,
}

impl Logger {
    /// Entry point; outputs are only reachable through the builder.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn dispatch(&self, record: &LogRecord) {
        // A broken sink must never abort a cleanup run
        for output in &self.outputs {
            let _ = output.write(record);
        }
    }

    fn record(&self, level: Level, scope: &str, msg: &str, raw: bool) -> LogRecord {
        LogRecord {
            level,
            scope: scope.to_string(),
            message: msg.to_string(),
            site: self.site.clone(),
            raw,
        }
    }

    /// Filters by severity, then fans out to all configured outputs.
    pub fn log(&self, level: Level, scope: &str, msg: &str) {
        if level < self.min_level {
            return;
        }
        self.dispatch(&self.record(level, scope, msg, false));
    }

    /// Per-file scan detail.
    pub fn trace(&self, scope: &str, msg: &str) {
        self.log(Level::Trace, scope, msg);
    }

    /// Policy decisions and settings, shown with `--verbose`.
    pub fn debug(&self, scope: &str, msg: &str) {
        self.log(Level::Debug, scope, msg);
    }

    pub fn info(&self, scope: &str, msg: &str) {
        self.log(Level::Info, scope, msg);
    }

    /// Goes to stderr; hidden on the terminal in quiet mode.
    pub fn warn(&self, scope: &str, msg: &str) {
        self.log(Level::Warn, scope, msg);
    }

    pub fn error(&self, scope: &str, msg: &str) {
        self.log(Level::Error, scope, msg);
    }

    /// Command output (summaries, stats) bypasses level filtering: the user
    /// asked for it explicitly.
    pub fn print(&self, scope: &str, msg: &str) {
        self.dispatch(&self.record(Level::Info, scope, msg, false));
    }

    /// Continuation lines (file listings) without tag or scope.
    pub fn raw(&self, msg: &str) {
        self.dispatch(&self.record(Level::Info, "", msg, true));
    }

    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    pub fn flush(&self) -> Result<(), crate::Error> {
        for output in &self.outputs {
            output.flush()?;
        }
        Ok(())
    }

    /// Lets callers skip building expensive messages that would be dropped.
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Site stamped on every record, if the run was started with `--site`.
    #[must_use]
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    /// Current log file of the first file-backed output. Notifications
    /// attach it so the recipient gets the full run log.
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.outputs
            .iter()
            .find_map(|o| o.file_path(self.site.as_deref()))
    }
}
