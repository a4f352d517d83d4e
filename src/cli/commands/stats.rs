//! Stats command implementation.

use crate::cli::util::exit_code;
use crate::config::Config;
use crate::logger::Logger;
use crate::retention::CleanupRunner;
use std::process::ExitCode;

/// Handles `wp-prune --stats`. Mode requirements do not apply; only the
/// target and safe paths matter.
#[must_use]
pub fn cmd_stats(config: &Config, logger: &Logger) -> ExitCode {
    let mut config = config.clone();
    if config.retention.retain_days.is_none() {
        config.retention.retain_days = Some(0);
    }
    if config.retention.min_free_gib.is_none() {
        config.retention.min_free_gib = Some(0);
    }

    let result = config
        .retention_policy()
        .and_then(|policy| CleanupRunner::new(policy, logger).stats());

    match result {
        Ok(stats) => {
            stats.log(logger);
            ExitCode::SUCCESS
        }
        Err(e) => {
            logger.error("STATS", &e.to_string());
            exit_code(&e)
        }
    }
}
