//! The default command: one retention run against the configured target.

use crate::cli::Cli;
use crate::cli::util::exit_code;
use crate::config::Config;
use crate::logger::Logger;
use crate::notify;
use crate::retention::CleanupRunner;
use std::process::ExitCode;

/// Builds the policy from the fully layered config and runs it once.
#[must_use]
pub fn cmd_cleanup(cli: &Cli, config: &Config, logger: &Logger) -> ExitCode {
    let policy = match config.retention_policy() {
        Ok(policy) => policy,
        Err(e) => {
            logger.error("CONFIG", &e.to_string());
            return exit_code(&e);
        }
    };

    let runner = CleanupRunner::new(policy, logger)
        .lock_dir(config.lock_dir())
        .notifiers(notify::from_config(&config.notify));

    match runner.run(cli.dry_run, cli.verbose) {
        Ok(result) if result.failed.is_empty() => ExitCode::SUCCESS,
        Ok(result) => {
            logger.warn(
                "CLEANUP",
                &format!("{} file(s) could not be deleted", result.failed.len()),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let scope = match e.kind() {
                crate::ErrorKind::SafetyViolation => "SAFETY",
                crate::ErrorKind::LockConflict | crate::ErrorKind::LockUnavailable => "LOCK",
                crate::ErrorKind::General => "CLEANUP",
            };
            logger.error(scope, &e.to_string());
            exit_code(&e)
        }
    }
}
