//! Candidate discovery. Lists regular files directly inside the target
//! directory; subdirectories and symlinks are never descended into or touched.

use crate::logger::Logger;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const SECS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Archive,
    Log,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Log => "log",
        }
    }
}

/// One file eligible for consideration. Metadata is captured at scan time
/// and never re-read, so decisions use one consistent snapshot.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub modified_at: SystemTime,
    pub size_bytes: u64,
    pub category: Category,
}

impl FileCandidate {
    /// Whole days since last modification. Future timestamps count as 0.
    #[must_use]
    pub fn age_days(&self, now: SystemTime) -> u64 {
        now.duration_since(self.modified_at)
            .map_or(0, |d| d.as_secs() / SECS_PER_DAY)
    }
}

/// Case-insensitive glob (`*`, `?`) over file names, compiled once to a regex.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
    source: String,
}

impl NamePattern {
    /// # Errors
    /// `InvalidConfig` if the glob is empty.
    pub fn from_glob(glob: &str) -> Result<Self, crate::Error> {
        Self::from_globs(&[glob])
    }

    /// One pattern matching `*.ext` for every extension. Leading dots are
    /// optional, so `"tar.gz"` and `".tar.gz"` are equivalent.
    ///
    /// # Errors
    /// `InvalidConfig` if no usable extension remains.
    pub fn from_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<Self, crate::Error> {
        let globs: Vec<String> = extensions
            .iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .map(|e| format!("*.{e}"))
            .collect();
        Self::from_globs(&globs)
    }

    fn from_globs<S: AsRef<str>>(globs: &[S]) -> Result<Self, crate::Error> {
        let alternatives: Vec<String> = globs
            .iter()
            .map(AsRef::as_ref)
            .filter(|g| !g.trim().is_empty())
            .map(glob_to_regex)
            .collect();

        if alternatives.is_empty() {
            return Err(crate::Error::InvalidConfig(
                "empty file name pattern".to_string(),
            ));
        }

        let source = globs
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        let regex = RegexBuilder::new(&format!("^(?:{})$", alternatives.join("|")))
            .case_insensitive(true)
            .build()
            .map_err(|e| crate::Error::InvalidConfig(format!("bad pattern '{source}': {e}")))?;

        Ok(Self { regex, source })
    }

    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2);
    for c in glob.trim().chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out
}

/// Optional floors applied while scanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanFilter {
    pub min_age_days: u32,
    pub min_size_bytes: u64,
}

/// Lists matching regular files directly inside `dir`.
///
/// A missing directory yields an empty list. Entries whose metadata cannot
/// be read are logged and skipped.
///
/// # Errors
/// The directory exists but cannot be listed.
pub fn scan(
    dir: &Path,
    pattern: &NamePattern,
    category: Category,
    filter: ScanFilter,
    now: SystemTime,
    logger: &Logger,
) -> Result<Vec<FileCandidate>, crate::Error> {
    if !dir.is_dir() {
        logger.debug(
            "SCAN",
            &format!("{} does not exist, nothing to scan", dir.display()),
        );
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                logger.warn("SCAN", &format!("Skipping unreadable entry: {e}"));
                continue;
            }
        };

        // Lossy so non UTF-8 names still match; deletion uses the real path
        let name = entry.file_name();
        if !pattern.matches(&name.to_string_lossy()) {
            continue;
        }

        // DirEntry::file_type does not follow symlinks
        match entry.file_type() {
            Ok(ft) if ft.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                logger.warn("SCAN", &format!("Cannot stat {}: {e}", entry.path().display()));
                continue;
            }
        }

        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                logger.warn("SCAN", &format!("Cannot stat {}: {e}", entry.path().display()));
                continue;
            }
        };
        let modified_at = match meta.modified() {
            Ok(t) => t,
            Err(e) => {
                logger.warn(
                    "SCAN",
                    &format!("No modification time for {}: {e}", entry.path().display()),
                );
                continue;
            }
        };

        let candidate = FileCandidate {
            path: entry.path(),
            modified_at,
            size_bytes: meta.len(),
            category,
        };

        if candidate.age_days(now) < u64::from(filter.min_age_days)
            || candidate.size_bytes < filter.min_size_bytes
        {
            continue;
        }

        logger.trace(
            "SCAN",
            &format!(
                "Found {} {} ({} bytes, {} days)",
                category.as_str(),
                candidate.path.display(),
                candidate.size_bytes,
                candidate.age_days(now)
            ),
        );
        found.push(candidate);
    }

    logger.debug(
        "SCAN",
        &format!(
            "{} {} candidate(s) matching {} in {}",
            found.len(),
            category.as_str(),
            pattern.as_str(),
            dir.display()
        ),
    );
    Ok(found)
}
