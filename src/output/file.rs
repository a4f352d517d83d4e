//! Append-only run log. The path is built from templates so per-site and
//! per-month files work without extra code: `{base_dir}/{site}/cleanup_{year}{month}.log`.

use super::{LogRecord, Output};
use crate::fmt::{FormatTemplate, FormatValues, TagStyle};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub const DEFAULT_SITE: &str = "default";

#[derive(Debug, Clone)]
pub struct FileOutput {
    base_dir: String,
    path_template: FormatTemplate,
    filename_template: FormatTemplate,
    content_template: FormatTemplate,
    timestamp_format: String,
    site: String,
    tag_style: TagStyle,
}

impl Default for FileOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// `<state_dir>/wp-prune/logs`, or `logs` when the platform has no state dir.
#[must_use]
pub fn default_log_dir() -> String {
    directories::ProjectDirs::from("", "", "wp-prune").map_or_else(
        || "logs".to_string(),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_dir())
                .join("logs")
                .to_string_lossy()
                .into_owned()
        },
    )
}

impl FileOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dir: default_log_dir(),
            path_template: FormatTemplate::parse("{site}"),
            filename_template: FormatTemplate::parse("cleanup_{year}{month}.log"),
            content_template: FormatTemplate::parse("{timestamp} {tag} {scope}  {msg}"),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            site: DEFAULT_SITE.to_string(),
            tag_style: TagStyle::default(),
        }
    }

    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = dir.into();
        self
    }

    #[must_use]
    pub fn path_structure(mut self, template: &str) -> Self {
        self.path_template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn filename_structure(mut self, template: &str) -> Self {
        self.filename_template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn content_structure(mut self, template: &str) -> Self {
        self.content_template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    fn build_path(&self, site: Option<&str>) -> PathBuf {
        let base = shellexpand::tilde(&self.base_dir);
        let values = FormatValues::new()
            .site(site.unwrap_or(&self.site))
            .date(&Local::now());

        PathBuf::from(base.as_ref())
            .join(self.path_template.render(&values))
            .join(self.filename_template.render(&values))
    }

    fn format_content(&self, record: &LogRecord) -> String {
        if record.raw {
            return record.message.clone();
        }

        let now = Local::now();
        let values = FormatValues::new()
            .timestamp(now.format(&self.timestamp_format).to_string())
            .tag(self.tag_style.format(record.level))
            .scope(&record.scope)
            .msg(&record.message)
            .level(record.level.as_str())
            .site(record.site.as_deref().unwrap_or(&self.site));

        self.content_template.render(&values)
    }
}

impl Output for FileOutput {
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        let path = self.build_path(record.site.as_deref());

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut content = self.format_content(record);
        content.push('\n');

        // One write per line keeps concurrent appenders from interleaving mid-line
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }

    fn file_path(&self, site: Option<&str>) -> Option<PathBuf> {
        Some(self.build_path(site))
    }
}
