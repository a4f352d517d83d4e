//! Log backends. The logger fans every record out to a list of `Output`
//! trait objects, so tests and embedders can plug in their own sinks.

mod file;
mod terminal;

pub use file::{DEFAULT_SITE, FileOutput, default_log_dir};
pub use terminal::TerminalOutput;

use crate::level::Level;
use std::path::PathBuf;

/// Everything a backend needs to render one line.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub scope: String,
    pub message: String,
    /// Site name for `{site}` placeholders. `None` falls back to the output's default.
    pub site: Option<String>,
    /// Continuation lines (file listings) are written without tag or scope.
    pub raw: bool,
}

pub trait Output: Send + Sync {
    /// Renders and writes one record.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;

    /// File a record for `site` would land in, for sinks backed by a file.
    fn file_path(&self, _site: Option<&str>) -> Option<PathBuf> {
        None
    }
}
