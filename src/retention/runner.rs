//! One cleanup run end to end: safety gate, lock, scan, retention passes,
//! summary and notification.

use super::engine::RetentionEngine;
use super::lock::{RunLock, default_lock_dir};
use super::policy::RetentionPolicy;
use super::result::CleanupRunResult;
use super::safe_path::SafePathValidator;
use super::scanner::{self, Category, NamePattern, ScanFilter};
use super::space::DiskSpaceProbe;
use super::stats::{CategoryStats, TargetStats};
use crate::logger::Logger;
use crate::notify::{self, Notification, Notifier, Severity};
use std::path::PathBuf;
use std::time::SystemTime;

pub struct CleanupRunner<'a> {
    policy: RetentionPolicy,
    logger: &'a Logger,
    probe: DiskSpaceProbe,
    lock_dir: PathBuf,
    notifiers: Vec<Box<dyn Notifier>>,
    now: Option<SystemTime>,
}

impl<'a> CleanupRunner<'a> {
    /// Real disk probe, default lock dir, no notification channels.
    #[must_use]
    pub fn new(policy: RetentionPolicy, logger: &'a Logger) -> Self {
        Self {
            policy,
            logger,
            probe: DiskSpaceProbe::default(),
            lock_dir: default_lock_dir(),
            notifiers: Vec::new(),
            now: None,
        }
    }

    #[must_use]
    pub fn probe(mut self, probe: DiskSpaceProbe) -> Self {
        self.probe = probe;
        self
    }

    #[must_use]
    pub fn lock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lock_dir = dir.into();
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Box::new(notifier));
        self
    }

    #[must_use]
    pub fn notifiers(mut self, notifiers: Vec<Box<dyn Notifier>>) -> Self {
        self.notifiers.extend(notifiers);
        self
    }

    /// Pins the clock used for age computations.
    #[must_use]
    pub const fn now(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    fn clock(&self) -> SystemTime {
        self.now.unwrap_or_else(SystemTime::now)
    }

    /// Runs the policy once. Fatal errors are reported to the notification
    /// channels before being returned.
    ///
    /// # Errors
    /// - `InvalidConfig` for a structurally invalid policy.
    /// - `UnsafePath` when the target is outside every safe prefix.
    /// - `AlreadyRunning` / `LockUnavailable` from the run lock.
    /// - `Io` when the target directory cannot be listed.
    pub fn run(&self, dry_run: bool, verbose: bool) -> Result<CleanupRunResult, crate::Error> {
        match self.run_locked(dry_run, verbose) {
            Ok(result) => Ok(result),
            Err(e) => {
                self.notify(
                    Notification::new(
                        Severity::Error,
                        format!("Cleanup of {} failed", self.policy.target().display()),
                        e.to_string(),
                    )
                    .payload(serde_json::json!({
                        "error": e.kind().as_str(),
                        "exit_code": e.exit_code(),
                    })),
                );
                Err(e)
            }
        }
    }

    fn run_locked(&self, dry_run: bool, verbose: bool) -> Result<CleanupRunResult, crate::Error> {
        self.check_target()?;

        let target = self.policy.target();
        let lock = RunLock::acquire(&self.lock_dir, target)?;
        self.logger
            .debug("LOCK", &format!("Acquired {}", lock.path().display()));

        let now = self.clock();
        self.logger.info(
            "CLEANUP",
            &format!(
                "Starting {} cleanup in {}{}",
                self.policy.mode,
                target.display(),
                if dry_run { " (dry run)" } else { "" }
            ),
        );
        self.logger.debug(
            "CLEANUP",
            &format!(
                "retain_days={}, min_free_gib={}, disk_free_enabled={}, max_log_size={}",
                self.policy.retain_days,
                self.policy.min_free_gib,
                self.policy.disk_free_enabled,
                self.policy.max_log_size_bytes
            ),
        );

        let before = self.probe.free_gib(target, self.logger);
        let (archives, logs) = self.scan(now)?;

        let mut engine = RetentionEngine::new(&self.policy, &self.probe, self.logger, dry_run, now);
        let archive_outcome = engine.apply(archives);
        let log_outcome = engine.apply(logs);

        let after = if dry_run {
            self.probe
                .free_gib_with(target, engine.pending_bytes(), self.logger)
        } else {
            self.probe.free_gib(target, self.logger)
        };

        let result = CleanupRunResult::from_outcomes(
            &target.display().to_string(),
            self.policy.mode,
            dry_run,
            archive_outcome,
            log_outcome,
            before,
            after,
        );
        result.log(self.logger, verbose);

        let mut notification =
            Notification::new(result.severity(), result.headline(), result.summary_lines().join("\n"));
        if let Some(log_file) = self.logger.log_file() {
            notification = notification.attachment(log_file);
        }
        if let Ok(payload) = serde_json::to_value(&result) {
            notification = notification.payload(payload);
        }
        self.notify(notification);

        drop(lock);
        Ok(result)
    }

    /// Read-only inventory. Passes the same safety gate as a run, takes no
    /// lock and deletes nothing.
    ///
    /// # Errors
    /// `InvalidConfig`, `UnsafePath`, or `Io` when the directory cannot be listed.
    pub fn stats(&self) -> Result<TargetStats, crate::Error> {
        self.check_target()?;

        let now = self.clock();
        let target = self.policy.target();
        let archives = scanner::scan(
            target,
            &NamePattern::from_extensions(&self.policy.archive_extensions)?,
            Category::Archive,
            ScanFilter::default(),
            now,
            self.logger,
        )?;
        let logs = scanner::scan(
            target,
            &NamePattern::from_glob(&self.policy.log_pattern)?,
            Category::Log,
            ScanFilter::default(),
            now,
            self.logger,
        )?;

        Ok(TargetStats {
            target: target.display().to_string(),
            archives: CategoryStats::from_candidates(archives, now),
            logs: CategoryStats::from_candidates(logs, now),
            free_gib: self.probe.free_gib(target, self.logger),
        })
    }

    fn check_target(&self) -> Result<(), crate::Error> {
        self.policy.validate()?;

        let target = self.policy.target();
        let validator = SafePathValidator::new(
            &self.policy.safe_path_prefixes,
            self.policy.canonicalize_paths,
        );
        match validator.matching_prefix(target) {
            Some(prefix) if validator.is_safe(target) => {
                self.logger.debug(
                    "SAFETY",
                    &format!("{} is under {}", target.display(), prefix.display()),
                );
                Ok(())
            }
            _ => Err(crate::Error::UnsafePath(target.to_path_buf())),
        }
    }

    fn scan(
        &self,
        now: SystemTime,
    ) -> Result<(Vec<scanner::FileCandidate>, Vec<scanner::FileCandidate>), crate::Error> {
        let target = self.policy.target();
        let min_age_days = self.policy.scan_min_age_days();

        let archives = scanner::scan(
            target,
            &NamePattern::from_extensions(&self.policy.archive_extensions)?,
            Category::Archive,
            ScanFilter {
                min_age_days,
                min_size_bytes: 0,
            },
            now,
            self.logger,
        )?;

        let logs = if self.policy.mode.scans_logs() {
            scanner::scan(
                target,
                &NamePattern::from_glob(&self.policy.log_pattern)?,
                Category::Log,
                ScanFilter {
                    min_age_days,
                    min_size_bytes: self.policy.max_log_size_bytes,
                },
                now,
                self.logger,
            )?
        } else {
            self.logger
                .debug("SCAN", "Space mode leaves log files alone");
            Vec::new()
        };

        Ok((archives, logs))
    }

    fn notify(&self, notification: Notification) {
        if self.notifiers.is_empty() {
            return;
        }
        notify::dispatch(&self.notifiers, &notification, self.logger);
    }
}
