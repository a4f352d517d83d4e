//! Tests for logger functionality.

mod common;

use std::fs;
use tempfile::TempDir;
use wp_prune::{Config, Level, Logger};

#[test]
fn builder_default() {
    let logger = Logger::builder().build();
    assert_eq!(logger.min_level(), Level::Info);
    assert_eq!(logger.output_count(), 0);
    assert!(logger.log_file().is_none());
}

#[test]
fn builder_multiple_outputs() {
    let logger = Logger::builder()
        .level(Level::Trace)
        .terminal()
        .colors(false)
        .done()
        .file()
        .base_dir("/tmp/wp-prune-test")
        .done()
        .build();
    assert_eq!(logger.output_count(), 2);
}

#[test]
fn log_respects_level() {
    let capture = common::Capture::default();
    let logger = Logger::builder()
        .level(Level::Warn)
        .output(capture.clone())
        .build();

    logger.info("TEST", "filtered");
    logger.warn("TEST", "kept");

    let lines = capture.lines();
    assert_eq!(lines, vec!["warn TEST kept".to_string()]);
}

#[test]
fn print_bypasses_level() {
    let capture = common::Capture::default();
    let logger = Logger::builder()
        .level(Level::Error)
        .output(capture.clone())
        .build();

    logger.print("SUMMARY", "always shown");
    logger.raw("  /var/backups/a.zip");
    assert_eq!(capture.lines().len(), 2);
}

#[test]
fn site_is_stamped_on_records() {
    let tmp_dir = TempDir::new().unwrap();
    let logger = Logger::builder()
        .site("shop")
        .file()
        .base_dir(tmp_dir.path().to_string_lossy())
        .path_structure("{site}")
        .filename_structure("run.log")
        .content_structure("{site} {msg}")
        .done()
        .build();

    logger.info("S", "hello");

    let path = tmp_dir.path().join("shop").join("run.log");
    assert_eq!(logger.log_file(), Some(path.clone()));
    assert_eq!(fs::read_to_string(path).unwrap().trim(), "shop hello");
}

#[test]
fn from_config_honours_sections() {
    let tmp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.general.level = "debug".to_string();
    config.terminal.enabled = false;
    config.file.base_dir = tmp_dir.path().to_string_lossy().into_owned();

    let logger = Logger::from_config(&config, Some("blog"));
    assert_eq!(logger.min_level(), Level::Debug);
    assert_eq!(logger.output_count(), 1);
    assert_eq!(logger.site(), Some("blog"));
    assert!(logger.log_file().unwrap().starts_with(tmp_dir.path().join("blog")));
}

#[test]
fn palette_with_unknown_level_is_reported_in_the_log_file() {
    let tmp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.general.quiet = true;
    config.terminal.colors = false;
    config.terminal.tag_alignment = "left".to_string();
    config
        .terminal
        .palette
        .insert("info".to_string(), "#8be9fd".to_string());
    config
        .terminal
        .palette
        .insert("shout".to_string(), "#ff0000".to_string());
    config.file.base_dir = tmp_dir.path().to_string_lossy().into_owned();
    config.file.content_structure = "{level} {msg}".to_string();

    let logger = Logger::from_config(&config, None);
    logger.flush().unwrap();
    assert_eq!(logger.output_count(), 2);

    let content = fs::read_to_string(logger.log_file().unwrap()).unwrap();
    assert!(content.contains("warn terminal.palette: unknown log level: 'shout'"));
    assert!(!content.contains("'info'"));
}
