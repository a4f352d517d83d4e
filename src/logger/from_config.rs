//! Logger construction from a loaded `Config`.

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::fmt::{Alignment, Color, TagStyle};
use crate::level::Level;

impl Logger {
    /// Builds terminal and file outputs as configured. `site` names the
    /// per-site log directory and is stamped on every record.
    #[must_use]
    pub fn from_config(config: &Config, site: Option<&str>) -> Self {
        let mut builder = LoggerBuilder::new().level(config.parse_level());
        if let Some(site) = site {
            builder = builder.site(site);
        }

        let mut warnings = config.warnings.clone();
        if config.terminal.enabled {
            builder = Self::configure_terminal(builder, config, &mut warnings);
        }
        if config.file.enabled {
            builder = Self::configure_file(builder, config);
        }

        let logger = builder.build();
        logger.debug(
            "LOGGER",
            &format!(
                "Level {}, terminal {}, file {}",
                logger.min_level(),
                if config.terminal.enabled { "on" } else { "off" },
                if config.file.enabled { "on" } else { "off" },
            ),
        );
        for warning in &warnings {
            logger.warn("CONFIG", warning);
        }
        logger
    }

    fn configure_terminal(
        builder: LoggerBuilder,
        config: &Config,
        warnings: &mut Vec<String>,
    ) -> LoggerBuilder {
        let terminal = &config.terminal;
        let tag_style = TagStyle {
            prefix: terminal.tag_prefix.clone(),
            suffix: terminal.tag_suffix.clone(),
            alignment: Alignment::parse_or(&terminal.tag_alignment, Alignment::Center),
            ..TagStyle::default()
        };

        let mut builder = builder
            .terminal()
            .colors(terminal.colors)
            .quiet(config.general.quiet)
            .structure(&terminal.structure)
            .scope_width(terminal.scope_width)
            .tag_style(tag_style);

        for (name, hex) in &terminal.palette {
            match name.parse::<Level>() {
                Ok(level) => builder = builder.level_color(level, Color::from_hex(hex)),
                Err(e) => warnings.push(format!("terminal.palette: {e}")),
            }
        }
        builder.done()
    }

    fn configure_file(builder: LoggerBuilder, config: &Config) -> LoggerBuilder {
        builder
            .file()
            .base_dir(config.file.base_dir.clone())
            .path_structure(&config.file.path_structure)
            .filename_structure(&config.file.filename_structure)
            .content_structure(&config.file.content_structure)
            .timestamp_format(config.file.timestamp_format.clone())
            .done()
    }
}
