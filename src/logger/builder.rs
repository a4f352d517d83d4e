//! Stepwise logger construction with one sub-builder per backend.

use super::Logger;
use crate::fmt::{Color, TagStyle};
use crate::level::Level;
use crate::output::{FileOutput, Output, TerminalOutput};

/// Collects outputs and the minimum level, then freezes them into a [`Logger`].
pub struct LoggerBuilder {
    pub(super) min_level: Level,
    pub(super) outputs: Vec<Box<dyn Output>>,
    pub(super) site: Option<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Info and no outputs. A logger built straight away drops everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            outputs: Vec::new(),
            site: None,
        }
    }

    /// Records below this level never reach any output.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Site name stamped on every record for `{site}` placeholders.
    #[must_use]
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Cron captures stdout and stderr separately, so the terminal backend
    /// gets its own sub-builder for streams, colors and quiet mode.
    #[must_use]
    pub fn terminal(self) -> TerminalBuilder {
        TerminalBuilder {
            parent: self,
            output: TerminalOutput::new(),
        }
    }

    /// Run log on disk; the file a notification attaches.
    #[must_use]
    pub fn file(self) -> FileBuilder {
        FileBuilder {
            parent: self,
            output: FileOutput::new(),
        }
    }

    /// Custom backends (test capture, syslog bridges).
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    /// The logger is read-only from here on and is shared as `&Logger`.
    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            min_level: self.min_level,
            outputs: self.outputs,
            site: self.site,
        }
    }
}

/// Terminal settings: color, quiet mode, line layout and tag look.
pub struct TerminalBuilder {
    parent: LoggerBuilder,
    output: TerminalOutput,
}

impl TerminalBuilder {
    /// Off for pipes and mail-captured cron output, where escape codes are noise.
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.output = self.output.colors(enabled);
        self
    }

    /// Only errors reach the terminal. The log file still gets everything.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.output = self.output.quiet(quiet);
        self
    }

    /// Line template, e.g. `{tag} {scope}  {msg}`.
    #[must_use]
    pub fn structure(mut self, template: &str) -> Self {
        self.output = self.output.template(template);
        self
    }

    /// Brackets, width and alignment of the `[INFO]` tag.
    #[must_use]
    pub fn tag_style(mut self, style: TagStyle) -> Self {
        self.output = self.output.tag_style(style);
        self
    }

    /// Scopes are padded to this width so messages line up.
    #[must_use]
    pub fn scope_width(mut self, width: usize) -> Self {
        self.output = self.output.scope_width(width);
        self
    }

    /// Replaces the built-in color for one level. Unset levels keep theirs.
    #[must_use]
    pub fn level_color(mut self, level: Level, color: Color) -> Self {
        self.output = self.output.level_color(level, color);
        self
    }

    /// Sub-builders consume self; `done` hands control back to the parent.
    /// Adds the file output and returns to the parent builder.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.outputs.push(Box::new(self.output));
        self.parent
    }
}

/// Run log file settings: location, naming and line layout.
pub struct FileBuilder {
    parent: LoggerBuilder,
    output: FileOutput,
}

impl FileBuilder {
    /// Root of all run logs. `~` is expanded when the path is built.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.output = self.output.base_dir(dir);
        self
    }

    /// Directory below `base_dir`; `{site}` gives one directory per site.
    #[must_use]
    pub fn path_structure(mut self, template: &str) -> Self {
        self.output = self.output.path_structure(template);
        self
    }

    /// `{year}{month}` in the name starts a fresh file each month.
    #[must_use]
    pub fn filename_structure(mut self, template: &str) -> Self {
        self.output = self.output.filename_structure(template);
        self
    }

    /// Line template for the file; usually adds `{timestamp}`.
    #[must_use]
    pub fn content_structure(mut self, template: &str) -> Self {
        self.output = self.output.content_structure(template);
        self
    }

    /// `chrono` strftime string for `{timestamp}`.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.output = self.output.timestamp_format(format);
        self
    }

    /// Fallback `{site}` for records that carry none.
    #[must_use]
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.output = self.output.site(site);
        self
    }

    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.outputs.push(Box::new(self.output));
        self.parent
    }
}
