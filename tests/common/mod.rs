//! Shared fixtures: aged files, a capturing log sink and a simulated disk.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use wp_prune::retention::SpaceSource;
use wp_prune::{Level, LogRecord, Logger, Output};

pub const DAY: u64 = 86_400;

/// Writes `size` bytes and backdates the mtime by `age_days` plus one hour,
/// so whole-day ages are stable against `now`.
pub fn aged_file(dir: &Path, name: &str, size: usize, age_days: u64, now: SystemTime) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![b'x'; size]).unwrap();
    let mtime = now - Duration::from_secs(age_days * DAY + 3600);
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
    path
}

#[derive(Clone, Default)]
pub struct Capture {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl Capture {
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| format!("{} {} {}", r.level, r.scope, r.message))
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

impl Output for Capture {
    fn write(&self, record: &LogRecord) -> Result<(), wp_prune::Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn flush(&self) -> Result<(), wp_prune::Error> {
        Ok(())
    }
}

pub fn capturing_logger() -> (Logger, Capture) {
    let capture = Capture::default();
    let logger = Logger::builder()
        .level(Level::Trace)
        .output(capture.clone())
        .build();
    (logger, capture)
}

pub fn silent_logger() -> Logger {
    Logger::builder().level(Level::Error).build()
}

/// Free space = `base` plus the weight of every tracked file that no longer
/// exists. Weights are independent of real file size, so tiny test files can
/// stand in for multi-GiB archives.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDisk {
    base: u64,
    tracked: Vec<(PathBuf, u64)>,
}

impl SimulatedDisk {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            tracked: Vec::new(),
        }
    }

    pub fn track(mut self, path: &Path, weight: u64) -> Self {
        self.tracked.push((path.to_path_buf(), weight));
        self
    }

    /// Tracks a file by its real size.
    pub fn track_real(self, path: &Path) -> Self {
        let size = fs::metadata(path).unwrap().len();
        self.track(path, size)
    }
}

impl SpaceSource for SimulatedDisk {
    fn available_bytes(&self, _path: &Path) -> io::Result<u64> {
        let freed: u64 = self
            .tracked
            .iter()
            .filter(|(p, _)| !p.exists())
            .map(|(_, w)| w)
            .sum();
        Ok(self.base + freed)
    }
}

/// A probe that always fails.
pub struct BrokenDisk;

impl SpaceSource for BrokenDisk {
    fn available_bytes(&self, _path: &Path) -> io::Result<u64> {
        Err(io::Error::other("statvfs failed"))
    }
}
