//! `wp-prune` - Retention cleanup for WordPress backup directories.
//!
//! Deletes old backup archives and oversized logs from one directory under
//! one of three rules:
//! - `time`: everything at least `retain_days` old
//! - `space`: oldest first, until `min_free_gib` is free
//! - `both`: old files, oldest first, only while space is short
//!
//! Every run passes a safe-path allow-list and holds a per-target lock.
//!
//! # Example
//!
//! ```no_run
//! use wp_prune::{CleanupRunner, Level, Logger, RetentionMode, RetentionPolicy};
//!
//! let logger = Logger::builder()
//!     .level(Level::Info)
//!     .terminal()
//!         .colors(true)
//!         .done()
//!     .build();
//!
//! let policy = RetentionPolicy::new("/var/backups/example.com")
//!     .mode(RetentionMode::Time)
//!     .retain_days(14)
//!     .safe_path("/var/backups");
//!
//! let result = CleanupRunner::new(policy, &logger).run(true, false)?;
//! println!("{}", result.headline());
//! # Ok::<(), wp_prune::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `wp-prune` binary and its Clap interface

pub mod config;
mod error;
pub mod fmt;
pub mod level;
pub mod logger;
pub mod notify;
pub mod output;
pub mod retention;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use error::{Error, ErrorKind};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use notify::{Notification, Notifier, Severity};
pub use output::{FileOutput, LogRecord, Output, TerminalOutput};
pub use retention::{
    CleanupRunResult, CleanupRunner, DiskSpaceProbe, RetentionMode, RetentionPolicy,
    SafePathValidator, SpaceSource,
};
