//! What to clean and under which rule. Built once per run from config and
//! CLI overrides; never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_ARCHIVE_EXTENSIONS: &[&str] =
    &["zip", "tar", "tar.gz", "tgz", "gz", "bz2", "xz", "7z"];

pub const DEFAULT_LOG_PATTERN: &str = "*.log";

/// Which eligibility rule governs deletion. Selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionMode {
    /// Delete everything older than the retention window.
    #[default]
    Time,
    /// Delete oldest-first until the free-space target is met.
    Space,
    /// Delete old files, oldest-first, only while space is below target.
    Both,
}

impl RetentionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Space => "space",
            Self::Both => "both",
        }
    }

    /// Modes that need `retain_days`.
    #[must_use]
    pub const fn uses_age(self) -> bool {
        matches!(self, Self::Time | Self::Both)
    }

    /// Modes that need `min_free_gib` and consult the disk probe.
    #[must_use]
    pub const fn uses_space(self) -> bool {
        matches!(self, Self::Space | Self::Both)
    }

    /// Space-only runs leave log files alone.
    #[must_use]
    pub const fn scans_logs(self) -> bool {
        self.uses_age()
    }
}

impl fmt::Display for RetentionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RetentionPolicy {
    pub mode: RetentionMode,
    pub retain_days: u32,
    pub disk_free_enabled: bool,
    pub min_free_gib: u64,
    pub target_path: PathBuf,
    /// Logs below this size are never candidates. Zero means every old log.
    pub max_log_size_bytes: u64,
    pub archive_extensions: Vec<String>,
    pub log_pattern: String,
    pub safe_path_prefixes: Vec<PathBuf>,
    /// Resolve symlinks and `..` before the safe-path check.
    pub canonicalize_paths: bool,
}

impl RetentionPolicy {
    /// Time mode, 30 days, no safe prefixes. Nothing passes the safety gate
    /// until prefixes are added.
    #[must_use]
    pub fn new(target_path: impl Into<PathBuf>) -> Self {
        Self {
            mode: RetentionMode::Time,
            retain_days: 30,
            disk_free_enabled: true,
            min_free_gib: 0,
            target_path: target_path.into(),
            max_log_size_bytes: 0,
            archive_extensions: DEFAULT_ARCHIVE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            log_pattern: DEFAULT_LOG_PATTERN.to_string(),
            safe_path_prefixes: Vec::new(),
            canonicalize_paths: true,
        }
    }

    #[must_use]
    pub const fn mode(mut self, mode: RetentionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn retain_days(mut self, days: u32) -> Self {
        self.retain_days = days;
        self
    }

    #[must_use]
    pub const fn disk_free_enabled(mut self, enabled: bool) -> Self {
        self.disk_free_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn min_free_gib(mut self, gib: u64) -> Self {
        self.min_free_gib = gib;
        self
    }

    #[must_use]
    pub const fn max_log_size_bytes(mut self, bytes: u64) -> Self {
        self.max_log_size_bytes = bytes;
        self
    }

    #[must_use]
    pub fn archive_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.archive_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn log_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.log_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn safe_path(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.safe_path_prefixes.push(prefix.into());
        self
    }

    #[must_use]
    pub const fn canonicalize_paths(mut self, enabled: bool) -> Self {
        self.canonicalize_paths = enabled;
        self
    }

    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target_path
    }

    /// Minimum age passed to the scanner. Only Time mode filters at scan
    /// time; Both needs every file so the engine can order them.
    #[must_use]
    pub const fn scan_min_age_days(&self) -> u32 {
        match self.mode {
            RetentionMode::Time => self.retain_days,
            RetentionMode::Space | RetentionMode::Both => 0,
        }
    }

    /// Structural checks that do not touch the filesystem.
    ///
    /// # Errors
    /// `InvalidConfig` for a relative target, an empty extension list or an
    /// empty log pattern.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.target_path.is_absolute() {
            return Err(crate::Error::InvalidConfig(format!(
                "target directory must be absolute: {}",
                self.target_path.display()
            )));
        }
        if self.archive_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(crate::Error::InvalidConfig(
                "archive_extensions must not be empty".to_string(),
            ));
        }
        if self.log_pattern.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "log_pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
