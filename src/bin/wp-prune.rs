//! Backup hosts run `wp-prune` from cron; the exit status is the contract
//! with whatever wraps it.
//!
//! Usage:
//!   wp-prune --target-dir <PATH> --retain-days <N>             Time mode
//!   wp-prune --target-dir <PATH> --mode space --min-free-gib <N>
//!   wp-prune --site <NAME> [--dry-run]                         Settings from config
//!   wp-prune --stats --target-dir <PATH>                       Inventory only
//!
//! Exit codes: 0 ok, 1 error, 2 unsafe target, 7 already running, 10 lock unusable.

use clap::Parser;
use clap::error::ErrorKind;
use std::process::ExitCode;
use wp_prune::cli::{Cli, run};

fn main() -> ExitCode {
    // clap exits with 2 on bad arguments, which would collide with the unsafe-target code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    run(&cli)
}
