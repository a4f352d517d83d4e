//! Console output: warn and error go to stderr, everything else to stdout.

use super::{LogRecord, Output};
use crate::fmt::{Alignment, Color, FormatTemplate, FormatValues, TagStyle, pad};
use crate::level::Level;
use std::collections::HashMap;
use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct TerminalOutput {
    colors_enabled: bool,
    /// Quiet keeps only errors on the console; the log file still gets everything.
    quiet: bool,
    tag_style: TagStyle,
    scope_width: usize,
    template: FormatTemplate,
    /// Per-level tag colors replacing the default palette.
    palette: HashMap<Level, Color>,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors_enabled: true,
            quiet: false,
            tag_style: TagStyle::default(),
            scope_width: 10,
            template: FormatTemplate::default(),
            palette: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn tag_style(mut self, style: TagStyle) -> Self {
        self.tag_style = style;
        self
    }

    #[must_use]
    pub const fn scope_width(mut self, width: usize) -> Self {
        self.scope_width = width;
        self
    }

    #[must_use]
    pub fn template(mut self, template: &str) -> Self {
        self.template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn level_color(mut self, level: Level, color: Color) -> Self {
        self.palette.insert(level, color);
        self
    }

    fn color_for(&self, level: Level) -> Color {
        self.palette
            .get(&level)
            .copied()
            .unwrap_or_else(|| Color::for_level(level))
    }

    fn format_record(&self, record: &LogRecord) -> String {
        let tag = self.tag_style.format(record.level);
        let scope = pad(&record.scope, self.scope_width, Alignment::Left);

        let (tag, scope) = if self.colors_enabled {
            (
                self.color_for(record.level).paint(&tag),
                format!("{}{scope}{}", Color::DIM, Color::RESET),
            )
        } else {
            (tag, scope)
        };

        let values = FormatValues::new()
            .tag(tag)
            .scope(scope)
            .msg(&record.message)
            .level(record.level.as_str())
            .site(record.site.as_deref().unwrap_or_default());

        self.template.render(&values)
    }
}

impl Output for TerminalOutput {
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        if self.quiet && record.level < Level::Error {
            return Ok(());
        }

        if record.raw {
            writeln!(io::stdout(), "{}", record.message)?;
            return Ok(());
        }

        let line = self.format_record(record);
        if record.level >= Level::Warn {
            writeln!(io::stderr(), "{line}")?;
        } else {
            writeln!(io::stdout(), "{line}")?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: Level, scope: &str, msg: &str) -> LogRecord {
        LogRecord {
            level,
            scope: scope.to_string(),
            message: msg.to_string(),
            site: None,
            raw: false,
        }
    }

    #[test]
    fn plain_line_has_padded_scope() {
        let out = TerminalOutput::new().colors(false).scope_width(8);
        let line = out.format_record(&record(Level::Warn, "SCAN", "hello"));
        assert_eq!(line, "[WARN ] SCAN      hello");
    }

    #[test]
    fn palette_overrides_default_color() {
        let custom = Color::new(1, 2, 3);
        let out = TerminalOutput::new().level_color(Level::Info, custom);
        let line = out.format_record(&record(Level::Info, "SCAN", "x"));
        assert!(line.starts_with(&custom.fg_ansi()));
    }

    #[test]
    fn colored_line_wraps_tag() {
        let out = TerminalOutput::new();
        let line = out.format_record(&record(Level::Error, "LOCK", "busy"));
        assert!(line.starts_with(&Color::red().fg_ansi()));
        assert!(line.ends_with("busy"));
    }
}
