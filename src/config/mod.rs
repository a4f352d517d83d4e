//! TOML configuration loading with `source = "..."` includes and per-site overrides.
//!
//! Layering, lowest first: built-in defaults, included files, the config
//! file itself, `[sites.<name>]`, then command line flags.

mod structs;

pub use structs::{
    FileConfig, GeneralConfig, NotifyConfig, RetentionConfig, RetentionOverrides, TerminalConfig,
};

use crate::level::Level;
use crate::retention::{RetentionPolicy, default_lock_dir, parse_size};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// An empty or missing config file still yields a usable config; every
/// section falls back to its defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub terminal: TerminalConfig,
    pub file: FileConfig,
    pub retention: RetentionConfig,
    pub notify: NotifyConfig,
    /// Per-site retention overrides, selected with `--site`.
    pub sites: HashMap<String, RetentionOverrides>,
    /// Non-fatal problems found while loading (missing includes). Logged
    /// once the logger exists.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Splits `source = "..."` include lines from the rest of the TOML.
/// Only a bare `source` key counts; `source_dir = ...` is ordinary TOML.
#[doc(hidden)]
#[must_use]
pub fn extract_sources(content: &str) -> (Vec<String>, String) {
    let mut sources = Vec::new();
    let mut remaining = String::new();

    for line in content.lines() {
        if let Some((key, value)) = line.trim().split_once('=')
            && key.trim() == "source"
        {
            let path = value.trim().trim_matches('"').trim_matches('\'');
            if !path.is_empty() {
                sources.push(path.to_string());
            }
        } else {
            remaining.push_str(line);
            remaining.push('\n');
        }
    }

    (sources, remaining)
}

/// Deep-merges `include` under `base`: keys already in `base` win, nested
/// tables are merged key by key.
fn merge_tables(base: &mut toml::Table, include: toml::Table) {
    for (key, value) in include {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (Some(_), _) => {}
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}

impl Config {
    /// Loads the config from the default location with includes resolved.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, a file can't be
    /// read, TOML parsing fails, or includes form a cycle.
    pub fn load() -> Result<Self, crate::Error> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or contains cyclic includes.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let mut warnings = Vec::new();
        let table = Self::load_with_sources(path, &mut HashSet::new(), &mut warnings)?;
        let mut config: Self = toml::Value::Table(table).try_into()?;
        config.warnings = warnings;
        Ok(config)
    }

    /// Recursive loader that expands `source = "..."` includes. `seen` holds
    /// the files on the current include chain.
    fn load_with_sources(
        path: &Path,
        seen: &mut HashSet<PathBuf>,
        warnings: &mut Vec<String>,
    ) -> Result<toml::Table, crate::Error> {
        if !path.exists() {
            return Ok(toml::Table::new());
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(canonical.clone()) {
            return Err(crate::Error::CyclicInclude(canonical));
        }

        let content = fs::read_to_string(path)?;
        let (sources, toml_content) = extract_sources(&content);
        let mut table: toml::Table = toml::from_str(&toml_content)?;

        for source in sources {
            let expanded = shellexpand::tilde(&source);
            let mut source_file = PathBuf::from(expanded.as_ref());
            // Relative includes resolve against the including file
            if source_file.is_relative()
                && let Some(parent) = path.parent()
            {
                source_file = parent.join(source_file);
            }

            if source_file.exists() {
                let included = Self::load_with_sources(&source_file, seen, warnings)?;
                merge_tables(&mut table, included);
            } else {
                warnings.push(format!("Source file not found: {source}"));
            }
        }

        // Only the current include chain counts; the same file may be sourced twice from siblings
        seen.remove(&canonical);
        Ok(table)
    }

    /// Applies `[sites.<name>]` on top of `[retention]`.
    ///
    /// # Errors
    /// `SiteNotFound` when no such table exists.
    pub fn for_site(&self, site: &str) -> Result<Self, crate::Error> {
        let overrides = self
            .sites
            .get(site)
            .ok_or_else(|| crate::Error::SiteNotFound(site.to_string()))?;
        let mut config = self.clone();
        config.apply(overrides);
        Ok(config)
    }

    /// Replaces every retention field the overrides set.
    pub fn apply(&mut self, overrides: &RetentionOverrides) {
        let r = &mut self.retention;
        if let Some(ref target) = overrides.target_dir {
            r.target_dir = Some(target.clone());
        }
        if let Some(mode) = overrides.mode {
            r.mode = mode;
        }
        if let Some(days) = overrides.retain_days {
            r.retain_days = Some(days);
        }
        if let Some(enabled) = overrides.disk_free_enabled {
            r.disk_free_enabled = enabled;
        }
        if let Some(gib) = overrides.min_free_gib {
            r.min_free_gib = Some(gib);
        }
        if let Some(ref size) = overrides.max_log_size {
            r.max_log_size = Some(size.clone());
        }
        if let Some(ref extensions) = overrides.archive_extensions {
            r.archive_extensions.clone_from(extensions);
        }
        if let Some(ref pattern) = overrides.log_pattern {
            r.log_pattern.clone_from(pattern);
        }
        if let Some(ref level) = overrides.level {
            self.general.level.clone_from(level);
        }
    }

    /// `<config_dir>/wp-prune/config.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("wp-prune").join("config.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Config stores level as a string for TOML ergonomics; unknown values fall back to info.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.general.level.parse().unwrap_or(Level::Info)
    }

    /// Lock directory with `~` expanded, or the platform default.
    #[must_use]
    pub fn lock_dir(&self) -> PathBuf {
        self.retention
            .lock_dir
            .as_deref()
            .map_or_else(default_lock_dir, |dir| PathBuf::from(expand(dir)))
    }

    /// Builds the validated policy for this run.
    ///
    /// # Errors
    /// `InvalidConfig` when the target is missing or relative, a mode
    /// requirement is unmet, `max_log_size` does not parse, or the extension
    /// list is empty.
    pub fn retention_policy(&self) -> Result<RetentionPolicy, crate::Error> {
        let r = &self.retention;

        let target = r
            .target_dir
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                crate::Error::InvalidConfig(
                    "no target directory (set retention.target_dir or pass --target-dir)"
                        .to_string(),
                )
            })?;

        let retain_days = match (r.mode.uses_age(), r.retain_days) {
            (true, None) => {
                return Err(crate::Error::InvalidConfig(format!(
                    "{} mode requires retain_days",
                    r.mode
                )));
            }
            (_, days) => days.unwrap_or(0),
        };
        let min_free_gib = match (r.mode.uses_space(), r.min_free_gib) {
            (true, None) => {
                return Err(crate::Error::InvalidConfig(format!(
                    "{} mode requires min_free_gib",
                    r.mode
                )));
            }
            (_, gib) => gib.unwrap_or(0),
        };
        let max_log_size_bytes = match r.max_log_size.as_deref() {
            Some(size) => parse_size(size).ok_or_else(|| {
                crate::Error::InvalidConfig(format!("invalid max_log_size '{size}'"))
            })?,
            None => 0,
        };

        let policy = r.safe_paths.iter().fold(
            RetentionPolicy::new(expand(target))
                .mode(r.mode)
                .retain_days(retain_days)
                .disk_free_enabled(r.disk_free_enabled)
                .min_free_gib(min_free_gib)
                .max_log_size_bytes(max_log_size_bytes)
                .archive_extensions(r.archive_extensions.iter().cloned())
                .log_pattern(r.log_pattern.clone())
                .canonicalize_paths(r.canonicalize_paths),
            |policy, prefix| policy.safe_path(expand(prefix)),
        );

        policy.validate()?;
        Ok(policy)
    }
}

fn expand(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}
