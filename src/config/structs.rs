//! Configuration struct definitions.

use crate::output::default_log_dir;
use crate::retention::{DEFAULT_ARCHIVE_EXTENSIONS, DEFAULT_LOG_PATTERN, RetentionMode};
use serde::Deserialize;
use std::collections::HashMap;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Minimum log level.
    pub level: String,
    /// Only errors reach the terminal.
    pub quiet: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            quiet: false,
        }
    }
}

/// Terminal output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    pub enabled: bool,
    pub colors: bool,
    /// Output structure template.
    pub structure: String,
    pub scope_width: usize,
    pub tag_prefix: String,
    pub tag_suffix: String,
    /// left, right or center.
    pub tag_alignment: String,
    /// Level name to `#RRGGBB`, e.g. `info = "#8be9fd"`.
    pub palette: HashMap<String, String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colors: true,
            structure: "{tag} {scope}  {msg}".to_string(),
            scope_width: 10,
            tag_prefix: "[".to_string(),
            tag_suffix: "]".to_string(),
            tag_alignment: "center".to_string(),
            palette: HashMap::new(),
        }
    }
}

/// Run log file configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub enabled: bool,
    /// Base directory for logs. `~` is expanded.
    pub base_dir: String,
    /// Directory template below `base_dir`.
    pub path_structure: String,
    pub filename_structure: String,
    pub content_structure: String,
    /// `chrono` strftime format.
    pub timestamp_format: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_dir: default_log_dir(),
            path_structure: "{site}".to_string(),
            filename_structure: "cleanup_{year}{month}.log".to_string(),
            content_structure: "{timestamp} {tag} {scope}  {msg}".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

/// `[retention]`: what to clean and how.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetentionConfig {
    pub target_dir: Option<String>,
    pub mode: RetentionMode,
    /// Required when the mode includes time.
    pub retain_days: Option<u32>,
    pub disk_free_enabled: bool,
    /// Required when the mode includes space.
    pub min_free_gib: Option<u64>,
    /// Logs smaller than this are left alone ("10M", "1G"). Unset means every old log.
    pub max_log_size: Option<String>,
    pub archive_extensions: Vec<String>,
    pub log_pattern: String,
    /// Allow-list of directories a target may live under.
    pub safe_paths: Vec<String>,
    pub canonicalize_paths: bool,
    pub lock_dir: Option<String>,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            target_dir: None,
            mode: RetentionMode::Time,
            retain_days: None,
            disk_free_enabled: true,
            min_free_gib: None,
            max_log_size: None,
            archive_extensions: DEFAULT_ARCHIVE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            log_pattern: DEFAULT_LOG_PATTERN.to_string(),
            safe_paths: ["/var/backups", "/backup", "/backups", "~/backups"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            canonicalize_paths: true,
            lock_dir: None,
        }
    }
}

/// Partial retention settings. Used for `[sites.<name>]` tables and for
/// command line flags; set fields replace the base value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetentionOverrides {
    pub target_dir: Option<String>,
    pub mode: Option<RetentionMode>,
    pub retain_days: Option<u32>,
    pub disk_free_enabled: Option<bool>,
    pub min_free_gib: Option<u64>,
    pub max_log_size: Option<String>,
    pub archive_extensions: Option<Vec<String>>,
    pub log_pattern: Option<String>,
    /// Per-site log level.
    pub level: Option<String>,
}

/// `[notify]`: where run summaries go.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    pub enabled: bool,
    /// JSONL file receiving one entry per run.
    pub status_file: Option<String>,
    /// Shell hook, run with `sh -c`.
    pub command: Option<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            status_file: None,
            command: None,
        }
    }
}
