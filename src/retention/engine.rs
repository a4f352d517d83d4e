//! Retention decisions: which candidates go, in what order, and when to stop.

use super::policy::{RetentionMode, RetentionPolicy};
use super::scanner::FileCandidate;
use super::size::format_size;
use super::space::DiskSpaceProbe;
use crate::logger::Logger;
use serde::Serialize;
use std::fs;
use std::time::SystemTime;

/// Per-candidate rule. Pure: the caller supplies the free-space reading.
///
/// - Time: `age >= retain_days`, space ignored.
/// - Space: disk checks enabled and `free < min_free_gib`, age ignored.
/// - Both: both of the above.
#[must_use]
pub fn should_delete(
    candidate: &FileCandidate,
    policy: &RetentionPolicy,
    current_free_gib: u64,
    now: SystemTime,
) -> bool {
    let old_enough = candidate.age_days(now) >= u64::from(policy.retain_days);
    let space_low = policy.disk_free_enabled && current_free_gib < policy.min_free_gib;

    match policy.mode {
        RetentionMode::Time => old_enough,
        RetentionMode::Space => space_low,
        RetentionMode::Both => old_enough && space_low,
    }
}

/// Tally for one category (archives or logs).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryOutcome {
    pub found: usize,
    pub deleted_count: usize,
    pub bytes_freed: u64,
    /// Deleted paths (or would-be-deleted, in a dry run).
    pub deleted: Vec<String>,
    /// Paths that could not be removed, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Applies one policy to candidate lists. Holds the dry-run byte ledger so
/// archive and log passes share one view of simulated free space.
pub struct RetentionEngine<'a> {
    policy: &'a RetentionPolicy,
    probe: &'a DiskSpaceProbe,
    logger: &'a Logger,
    dry_run: bool,
    now: SystemTime,
    pending_bytes: u64,
}

impl<'a> RetentionEngine<'a> {
    #[must_use]
    pub const fn new(
        policy: &'a RetentionPolicy,
        probe: &'a DiskSpaceProbe,
        logger: &'a Logger,
        dry_run: bool,
        now: SystemTime,
    ) -> Self {
        Self {
            policy,
            probe,
            logger,
            dry_run,
            now,
            pending_bytes: 0,
        }
    }

    /// Bytes a dry run pretended to free so far.
    #[must_use]
    pub const fn pending_bytes(&self) -> u64 {
        self.pending_bytes
    }

    fn free_gib(&self) -> u64 {
        let pending = if self.dry_run { self.pending_bytes } else { 0 };
        self.probe
            .free_gib_with(self.policy.target(), pending, self.logger)
    }

    pub fn apply(&mut self, mut candidates: Vec<FileCandidate>) -> CategoryOutcome {
        let mut outcome = CategoryOutcome {
            found: candidates.len(),
            ..CategoryOutcome::default()
        };

        match self.policy.mode {
            RetentionMode::Time => {
                for candidate in &candidates {
                    if should_delete(candidate, self.policy, 0, self.now) {
                        self.remove(candidate, &mut outcome);
                    }
                }
            }
            RetentionMode::Space | RetentionMode::Both => {
                if !self.policy.disk_free_enabled {
                    self.logger.warn(
                        "POLICY",
                        &format!(
                            "Disk-space checks are disabled; {} mode deletes nothing",
                            self.policy.mode
                        ),
                    );
                    return outcome;
                }

                // Stable: equal mtimes keep scan order
                candidates.sort_by_key(|c| c.modified_at);

                for candidate in &candidates {
                    let free = self.free_gib();
                    if self.policy.mode == RetentionMode::Space && free >= self.policy.min_free_gib
                    {
                        self.logger.debug(
                            "POLICY",
                            &format!(
                                "Free space {free} GiB meets target {} GiB, stopping",
                                self.policy.min_free_gib
                            ),
                        );
                        break;
                    }

                    if should_delete(candidate, self.policy, free, self.now) {
                        self.remove(candidate, &mut outcome);
                    } else {
                        self.logger.trace(
                            "POLICY",
                            &format!(
                                "Keeping {} (age {} days, free {free} GiB)",
                                candidate.path.display(),
                                candidate.age_days(self.now)
                            ),
                        );
                    }
                }
            }
        }

        outcome
    }

    fn remove(&mut self, candidate: &FileCandidate, outcome: &mut CategoryOutcome) {
        let path = candidate.path.display().to_string();
        let size = format_size(candidate.size_bytes);
        let age = candidate.age_days(self.now);

        if self.dry_run {
            self.logger
                .info("DELETE", &format!("Would delete {path} ({size}, {age} days)"));
            self.pending_bytes = self.pending_bytes.saturating_add(candidate.size_bytes);
        } else {
            match fs::remove_file(&candidate.path) {
                Ok(()) => {
                    self.logger
                        .info("DELETE", &format!("Deleted {path} ({size}, {age} days)"));
                }
                Err(e) => {
                    self.logger
                        .error("DELETE", &format!("Failed to delete {path}: {e}"));
                    outcome.failed.push((path, e.to_string()));
                    return;
                }
            }
        }

        outcome.deleted_count += 1;
        outcome.bytes_freed += candidate.size_bytes;
        outcome.deleted.push(path);
    }
}
