//! Free-space readings for the filesystem holding the target directory.

use super::size::{GIB, bytes_to_gib};
use crate::logger::Logger;
use std::io;
use std::path::Path;

/// Raw available-bytes query. Swappable so tests can simulate a disk that
/// fills up or drains as files are removed.
pub trait SpaceSource: Send + Sync {
    /// # Errors
    /// The underlying `statvfs` (or equivalent) call failed.
    fn available_bytes(&self, path: &Path) -> io::Result<u64>;
}

/// The real filesystem, via `statvfs` on Unix and `GetDiskFreeSpaceExW` on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSpace;

impl SpaceSource for FsSpace {
    fn available_bytes(&self, path: &Path) -> io::Result<u64> {
        fs2::available_space(path)
    }
}

pub struct DiskSpaceProbe {
    source: Box<dyn SpaceSource>,
}

impl Default for DiskSpaceProbe {
    fn default() -> Self {
        Self::new(FsSpace)
    }
}

impl DiskSpaceProbe {
    #[must_use]
    pub fn new(source: impl SpaceSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Available space in whole GiB. A failed query reads as 0 so space
    /// driven modes err towards cleaning rather than silently skipping.
    #[must_use]
    pub fn free_gib(&self, path: &Path, logger: &Logger) -> u64 {
        self.free_gib_with(path, 0, logger)
    }

    /// Like [`free_gib`](Self::free_gib), with `pending_bytes` added before
    /// rounding. Dry runs use it to account for deletions they only pretend to make.
    #[must_use]
    pub fn free_gib_with(&self, path: &Path, pending_bytes: u64, logger: &Logger) -> u64 {
        match self.source.available_bytes(path) {
            Ok(bytes) => bytes_to_gib(bytes.saturating_add(pending_bytes)),
            Err(e) => {
                logger.warn(
                    "SPACE",
                    &format!(
                        "Cannot read free space for {}: {e}; assuming 0 GiB",
                        path.display()
                    ),
                );
                bytes_to_gib(pending_bytes)
            }
        }
    }
}

/// Whole GiB to bytes, saturating.
#[must_use]
pub const fn gib_to_bytes(gib: u64) -> u64 {
    gib.saturating_mul(GIB)
}
