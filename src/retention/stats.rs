//! Read-only inventory of a target directory. Uses the same scanner as a
//! cleanup run so the numbers match what a run would consider.

use super::scanner::{Category, FileCandidate};
use super::size::format_size;
use crate::logger::Logger;
use serde::Serialize;
use std::time::SystemTime;

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub size: u64,
    pub age_days: u64,
}

/// Totals for one category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryStats {
    pub total_files: usize,
    pub total_size: u64,
    pub oldest_file: Option<String>,
    pub newest_file: Option<String>,
    /// Oldest first.
    pub files: Vec<FileInfo>,
}

impl CategoryStats {
    #[must_use]
    pub fn from_candidates(mut candidates: Vec<FileCandidate>, now: SystemTime) -> Self {
        candidates.sort_by_key(|c| c.modified_at);

        let files: Vec<FileInfo> = candidates
            .iter()
            .map(|c| FileInfo {
                path: c.path.display().to_string(),
                size: c.size_bytes,
                age_days: c.age_days(now),
            })
            .collect();

        Self {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            oldest_file: files.first().map(|f| f.path.clone()),
            newest_file: files.last().map(|f| f.path.clone()),
            files,
        }
    }

    fn log(&self, logger: &Logger, category: Category) {
        let scope = match category {
            Category::Archive => "ARCHIVES",
            Category::Log => "LOGS",
        };
        logger.print(scope, &format!("Files:  {}", self.total_files));
        logger.print(scope, &format!("Size:   {}", format_size(self.total_size)));

        if let Some(oldest) = &self.oldest_file {
            logger.print(scope, &format!("Oldest: {oldest}"));
        }
        if let Some(newest) = &self.newest_file {
            logger.print(scope, &format!("Newest: {newest}"));
        }

        for file in &self.files {
            let age = match file.age_days {
                0 => "today".to_string(),
                1 => "1 day".to_string(),
                n => format!("{n} days"),
            };
            logger.raw(&format!("  {} ({}, {age})", file.path, format_size(file.size)));
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetStats {
    pub target: String,
    pub archives: CategoryStats,
    pub logs: CategoryStats,
    pub free_gib: u64,
}

impl TargetStats {
    #[must_use]
    pub const fn total_files(&self) -> usize {
        self.archives.total_files + self.logs.total_files
    }

    #[must_use]
    pub const fn total_size(&self) -> u64 {
        self.archives.total_size + self.logs.total_size
    }

    /// Uses `print()` so the report shows regardless of the configured level.
    pub fn log(&self, logger: &Logger) {
        logger.print("STATS", &format!("Target:    {}", self.target));
        logger.print("STATS", &format!("Free:      {} GiB", self.free_gib));
        logger.print(
            "STATS",
            &format!(
                "Total:     {} file(s), {}",
                self.total_files(),
                format_size(self.total_size())
            ),
        );
        self.archives.log(logger, Category::Archive);
        self.logs.log(logger, Category::Log);
    }
}
