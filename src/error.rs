//! Unified error type for all wp-prune operations.
//!
//! Calling automation (cron wrappers, backup orchestration) branches on the
//! process exit status, so every error maps onto an [`ErrorKind`] that owns
//! the numeric code.

use std::path::PathBuf;

/// Distinguishable failure categories, each with its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing config, invalid arguments, unreadable directories.
    General,
    /// Target directory is outside the allow-listed prefixes.
    SafetyViolation,
    /// Another run already holds the lock for this target.
    LockConflict,
    /// The lock file itself could not be created or opened.
    LockUnavailable,
}

impl ErrorKind {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::General => 1,
            Self::SafetyViolation => 2,
            Self::LockConflict => 7,
            Self::LockUnavailable => 10,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::SafetyViolation => "safety-violation",
            Self::LockConflict => "lock-conflict",
            Self::LockUnavailable => "lock-unavailable",
        }
    }
}

/// Error type for wp-prune operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Cyclic include detected in config sources.
    CyclicInclude(PathBuf),
    /// A config value or CLI flag is missing or out of range.
    InvalidConfig(String),
    /// Unknown `[sites.<name>]` entry requested.
    SiteNotFound(String),
    /// Target directory failed the safe-path check.
    UnsafePath(PathBuf),
    /// Lock is held by another run against the same target.
    AlreadyRunning { target: PathBuf, lock_path: PathBuf },
    /// Lock file could not be created or opened.
    LockUnavailable {
        lock_path: PathBuf,
        source: std::io::Error,
    },
    /// A notification sink rejected the message.
    Notify(String),
    /// Format/serialization error.
    Format(String),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsafePath(_) => ErrorKind::SafetyViolation,
            Self::AlreadyRunning { .. } => ErrorKind::LockConflict,
            Self::LockUnavailable { .. } => ErrorKind::LockUnavailable,
            _ => ErrorKind::General,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::CyclicInclude(p) => write!(f, "cyclic include: {}", p.display()),
            Self::InvalidConfig(s) => write!(f, "invalid config: {s}"),
            Self::SiteNotFound(name) => write!(f, "site not found in config: {name}"),
            Self::UnsafePath(p) => write!(
                f,
                "target directory {} is not under any allowed safe path",
                p.display()
            ),
            Self::AlreadyRunning { target, lock_path } => write!(
                f,
                "another cleanup is already running for {} (lock: {})",
                target.display(),
                lock_path.display()
            ),
            Self::LockUnavailable { lock_path, source } => write!(
                f,
                "cannot open lock file {}: {source}",
                lock_path.display()
            ),
            Self::Notify(s) => write!(f, "notification failed: {s}"),
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::LockUnavailable { source: e, .. } => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
