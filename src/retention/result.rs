//! Outcome of one cleanup run: summary lines for humans, a JSON payload for
//! status files and hooks.

use super::engine::CategoryOutcome;
use super::policy::RetentionMode;
use super::size::format_size;
use crate::logger::Logger;
use crate::notify::Severity;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CleanupRunResult {
    pub target: String,
    pub mode: RetentionMode,
    pub dry_run: bool,
    pub archives_found: usize,
    pub archives_deleted_count: usize,
    pub archives_bytes_freed: u64,
    pub logs_found: usize,
    pub logs_deleted_count: usize,
    pub logs_bytes_freed: u64,
    pub disk_free_before_gib: u64,
    pub disk_free_after_gib: u64,
    pub deleted: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl CleanupRunResult {
    #[must_use]
    pub fn from_outcomes(
        target: &str,
        mode: RetentionMode,
        dry_run: bool,
        archives: CategoryOutcome,
        logs: CategoryOutcome,
        disk_free_before_gib: u64,
        disk_free_after_gib: u64,
    ) -> Self {
        let mut deleted = archives.deleted;
        deleted.extend(logs.deleted);
        let mut failed = archives.failed;
        failed.extend(logs.failed);

        Self {
            target: target.to_string(),
            mode,
            dry_run,
            archives_found: archives.found,
            archives_deleted_count: archives.deleted_count,
            archives_bytes_freed: archives.bytes_freed,
            logs_found: logs.found,
            logs_deleted_count: logs.deleted_count,
            logs_bytes_freed: logs.bytes_freed,
            disk_free_before_gib,
            disk_free_after_gib,
            deleted,
            failed,
        }
    }

    #[must_use]
    pub const fn total_deleted(&self) -> usize {
        self.archives_deleted_count + self.logs_deleted_count
    }

    #[must_use]
    pub const fn total_bytes_freed(&self) -> u64 {
        self.archives_bytes_freed + self.logs_bytes_freed
    }

    /// Dry runs are informational; any failed deletion downgrades to a warning.
    #[must_use]
    pub fn severity(&self) -> Severity {
        if self.dry_run {
            Severity::Info
        } else if self.failed.is_empty() {
            Severity::Success
        } else {
            Severity::Warning
        }
    }

    /// One-line headline used as notification title.
    #[must_use]
    pub fn headline(&self) -> String {
        let verb = if self.dry_run { "would free" } else { "freed" };
        format!(
            "Cleanup of {} ({} mode{}): {} file(s), {verb} {}",
            self.target,
            self.mode,
            if self.dry_run { ", dry run" } else { "" },
            self.total_deleted(),
            format_size(self.total_bytes_freed()),
        )
    }

    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let (deleted, freed) = if self.dry_run {
            ("would delete", "would free")
        } else {
            ("deleted", "freed")
        };
        let mut lines = vec![
            format!(
                "Archives: {} found, {} {deleted}, {} {freed}",
                self.archives_found,
                self.archives_deleted_count,
                format_size(self.archives_bytes_freed)
            ),
            format!(
                "Logs:     {} found, {} {deleted}, {} {freed}",
                self.logs_found,
                self.logs_deleted_count,
                format_size(self.logs_bytes_freed)
            ),
            format!(
                "Disk free: {} GiB before, {} GiB after",
                self.disk_free_before_gib, self.disk_free_after_gib
            ),
        ];
        if !self.failed.is_empty() {
            lines.push(format!("Failed:   {} file(s)", self.failed.len()));
        }
        lines
    }

    /// Prints the summary through `print` so it shows regardless of level.
    /// `verbose` adds the per-file listing.
    pub fn log(&self, logger: &Logger, verbose: bool) {
        logger.print("SUMMARY", &self.headline());
        for line in self.summary_lines() {
            logger.print("SUMMARY", &line);
        }
        if verbose {
            for path in &self.deleted {
                logger.raw(&format!("  {path}"));
            }
        }
        for (path, err) in &self.failed {
            logger.warn("SUMMARY", &format!("Not deleted: {path}: {err}"));
        }
    }
}
