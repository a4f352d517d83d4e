//! Utility functions for the CLI.

use super::Cli;
use crate::config::Config;
use crate::logger::Logger;
use std::process::ExitCode;

/// Config with every layer applied: file, `[sites.<name>]`, then CLI flags.
///
/// # Errors
/// Config loading errors, or `SiteNotFound` for an unknown `--site`.
pub fn load_config(cli: &Cli) -> Result<Config, crate::Error> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(site) = &cli.site {
        config = config.for_site(site)?;
    }
    config.apply(&cli.overrides());

    if cli.verbose && config.parse_level() > crate::level::Level::Debug {
        config.general.level = "debug".to_string();
    }
    if cli.quiet {
        config.general.quiet = true;
    }
    if cli.no_notify {
        config.notify.enabled = false;
    }
    Ok(config)
}

/// Builds the run logger; the site name selects the per-site log directory.
#[must_use]
pub fn build_logger(config: &Config, site: Option<&str>) -> Logger {
    Logger::from_config(config, site)
}

/// Process exit code for a fatal error.
#[must_use]
pub fn exit_code(error: &crate::Error) -> ExitCode {
    ExitCode::from(error.exit_code())
}
