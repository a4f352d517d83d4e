//! Gate in front of every destructive run: the target directory must live
//! under one of the allow-listed prefixes.
//!
//! Matching is per path component, so `/var/backups-old` is not under
//! `/var/backups`. With canonicalization on, existing paths are resolved
//! through symlinks first; paths that do not exist are folded lexically so
//! `/var/backups/../../etc` cannot slip through either.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SafePathValidator {
    prefixes: Vec<PathBuf>,
    canonicalize: bool,
}

impl SafePathValidator {
    #[must_use]
    pub fn new<I, P>(prefixes: I, canonicalize: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().to_path_buf())
                .collect(),
            canonicalize,
        }
    }

    /// True iff `target` resolves to a path under at least one prefix.
    /// An empty allow-list rejects everything.
    #[must_use]
    pub fn is_safe(&self, target: &Path) -> bool {
        if !target.is_absolute() {
            return false;
        }
        let target = self.resolve(target);
        self.prefixes
            .iter()
            .filter(|prefix| prefix.is_absolute())
            .any(|prefix| target.starts_with(self.resolve(prefix)))
    }

    /// Prefix that admitted `target`, for log messages.
    #[must_use]
    pub fn matching_prefix(&self, target: &Path) -> Option<&Path> {
        let resolved = self.resolve(target);
        self.prefixes
            .iter()
            .find(|prefix| prefix.is_absolute() && resolved.starts_with(self.resolve(prefix)))
            .map(PathBuf::as_path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if self.canonicalize
            && let Ok(real) = path.canonicalize()
        {
            return real;
        }
        normalize(path)
    }
}

/// Convenience form of [`SafePathValidator::is_safe`] with canonicalization on.
#[must_use]
pub fn is_safe(target: &Path, allowed_prefixes: &[PathBuf]) -> bool {
    SafePathValidator::new(allowed_prefixes, true).is_safe(target)
}

/// Folds `.` and `..` without touching the filesystem. `..` at the root stays at the root.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
