//! Command-line interface for `wp-prune`, built with Clap.

pub mod commands;
pub mod util;

use crate::config::RetentionOverrides;
use crate::retention::RetentionMode;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

pub use commands::{cmd_cleanup, cmd_stats};
pub use util::{build_logger, exit_code, load_config};

/// Retention mode for CLI arguments.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    Time,
    Space,
    Both,
}

impl From<ModeArg> for RetentionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Time => Self::Time,
            ModeArg::Space => Self::Space,
            ModeArg::Both => Self::Both,
        }
    }
}

/// wp-prune - Retention cleanup for WordPress backup directories.
#[derive(Debug, Parser)]
#[command(
    name = "wp-prune",
    version,
    about = "Delete old WordPress backup archives and logs by age or free disk space"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Config file (default: <config_dir>/wp-prune/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Apply the [sites.<NAME>] overrides from the config
    #[arg(long, value_name = "NAME")]
    pub site: Option<String>,

    /// Backup directory to clean
    #[arg(long, value_name = "PATH")]
    pub target_dir: Option<String>,

    /// Retention rule
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Delete files at least this many days old (time and both modes)
    #[arg(long, value_name = "N")]
    pub retain_days: Option<u32>,

    /// Free-space target in GiB (space and both modes)
    #[arg(long, value_name = "N")]
    pub min_free_gib: Option<u64>,

    /// Only logs at least this large are candidates (e.g. 10M, 1G)
    #[arg(long, value_name = "SIZE")]
    pub max_log_size: Option<String>,

    /// Report what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging and a per-file listing in the summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Only errors on the terminal
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Skip notification channels for this run
    #[arg(long)]
    pub no_notify: bool,

    /// Print an inventory of the target directory and exit
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// Retention flags as overrides; unset flags leave config values alone.
    #[must_use]
    pub fn overrides(&self) -> RetentionOverrides {
        RetentionOverrides {
            target_dir: self.target_dir.clone(),
            mode: self.mode.map(Into::into),
            retain_days: self.retain_days,
            min_free_gib: self.min_free_gib,
            max_log_size: self.max_log_size.clone(),
            ..RetentionOverrides::default()
        }
    }
}

/// Loads config, builds the logger, and dispatches to the requested command.
#[must_use]
pub fn run(cli: &Cli) -> ExitCode {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wp-prune: {e}");
            return exit_code(&e);
        }
    };

    let logger = build_logger(&config, cli.site.as_deref());
    let code = if cli.stats {
        cmd_stats(&config, &logger)
    } else {
        cmd_cleanup(cli, &config, &logger)
    };
    let _ = logger.flush();
    code
}
