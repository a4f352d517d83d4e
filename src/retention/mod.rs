//! Backup retention: decides which archives and logs in a backup directory
//! are removed, under a time, space, or combined rule.
//!
//! Pieces, bottom-up:
//! - [`SafePathValidator`] refuses targets outside the allow-list.
//! - [`DiskSpaceProbe`] reads free space through a swappable [`SpaceSource`].
//! - [`scan`] lists candidates directly inside the target.
//! - [`RetentionEngine`] applies the policy and removes files.
//! - [`CleanupRunner`] ties them together under a [`RunLock`].

mod engine;
mod lock;
mod policy;
mod result;
mod runner;
mod safe_path;
mod scanner;
mod size;
mod space;
mod stats;

pub use engine::{CategoryOutcome, RetentionEngine, should_delete};
pub use lock::{RunLock, default_lock_dir, lock_key, lock_path_for};
pub use policy::{DEFAULT_ARCHIVE_EXTENSIONS, DEFAULT_LOG_PATTERN, RetentionMode, RetentionPolicy};
pub use result::CleanupRunResult;
pub use runner::CleanupRunner;
pub use safe_path::{SafePathValidator, is_safe, normalize};
pub use scanner::{Category, FileCandidate, NamePattern, ScanFilter, scan};
pub use size::{GIB, bytes_to_gib, format_size, parse_size};
pub use space::{DiskSpaceProbe, FsSpace, SpaceSource, gib_to_bytes};
pub use stats::{CategoryStats, FileInfo, TargetStats};
