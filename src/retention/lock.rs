//! One advisory lock per target directory, so two cleanup runs never race
//! over the same files. Acquisition never waits.
//!
//! The lock is `flock`-style: it belongs to the open file, so the kernel
//! drops it when the process exits for any reason, including signals. The
//! lock file itself is left in place; deleting it while held would let a
//! second process lock a fresh inode under the same name.

use super::safe_path::normalize;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default lock directory: the per-user runtime dir, else the system temp dir.
#[must_use]
pub fn default_lock_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wp-prune")
        .and_then(|dirs| dirs.runtime_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::temp_dir().join("wp-prune"))
}

/// Path the lock is keyed on. Spellings of one directory (`dir/`,
/// `dir/./`, a symlink to it) all resolve to the same key.
#[must_use]
pub fn lock_key(target: &Path) -> PathBuf {
    target
        .canonicalize()
        .unwrap_or_else(|_| normalize(target))
}

/// `<lock_dir>/cleanup-<16 hex chars of BLAKE3(resolved target)>.lock`
#[must_use]
pub fn lock_path_for(lock_dir: &Path, target: &Path) -> PathBuf {
    let key = lock_key(target);
    let hash = blake3::hash(key.as_os_str().as_encoded_bytes());
    let hex = hash.to_hex();
    lock_dir.join(format!("cleanup-{}.lock", &hex[..16]))
}

/// Held lock. Dropping it releases the lock.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// # Errors
    /// - `AlreadyRunning` when another process (or handle) holds the lock.
    /// - `LockUnavailable` when the lock file cannot be created or opened.
    pub fn acquire(lock_dir: &Path, target: &Path) -> Result<Self, crate::Error> {
        let path = lock_path_for(lock_dir, target);
        let unavailable = |source: io::Error| crate::Error::LockUnavailable {
            lock_path: path.clone(),
            source,
        };

        fs::create_dir_all(lock_dir).map_err(unavailable)?;

        let mut opts = OpenOptions::new();
        opts.create(true).read(true).write(true).truncate(false);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        let mut file = opts.open(&path).map_err(unavailable)?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => {}
            Err(e) if is_contended(&e) => {
                return Err(crate::Error::AlreadyRunning {
                    target: target.to_path_buf(),
                    lock_path: path.clone(),
                });
            }
            Err(e) => return Err(unavailable(e)),
        }

        // Owner pid for humans inspecting a stuck lock; the lock itself is the flock
        let _ = file.set_len(0);
        let _ = writeln!(file, "{} {}", std::process::id(), target.display());

        Ok(Self { file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_contended(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
