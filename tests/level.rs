//! Level parsing and gating as seen from config and the logger.

mod common;

use common::Capture;
use std::fs;
use tempfile::TempDir;
use wp_prune::{Config, Level, Logger};

#[test]
fn levels_sort_by_severity() {
    let mut levels = vec![Level::Error, Level::Trace, Level::Warn, Level::Info, Level::Debug];
    levels.sort();
    assert_eq!(
        levels,
        [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error]
    );
}

#[test]
fn aliases_and_case_are_accepted() {
    assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
    assert_eq!("Err".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
}

#[test]
fn unknown_level_names_the_input() {
    let err = "loud".parse::<Level>().unwrap_err();
    assert!(err.to_string().contains("loud"));
}

#[test]
fn display_round_trips_through_parse() {
    for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error] {
        assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
    }
}

#[test]
fn config_falls_back_to_info_on_bad_level() {
    let mut config = Config::default();
    config.general.level = "chatty".to_string();
    assert_eq!(config.parse_level(), Level::Info);
}

#[test]
fn site_level_overrides_general() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[general]\nlevel = \"warn\"\n\n[sites.shop]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level(), Level::Warn);
    assert_eq!(config.for_site("shop").unwrap().parse_level(), Level::Debug);
}

#[test]
fn records_below_minimum_are_dropped() {
    let capture = Capture::default();
    let logger = Logger::builder()
        .level(Level::Warn)
        .output(capture.clone())
        .build();
    logger.info("RUN", "hidden");
    logger.warn("RUN", "shown");
    logger.error("RUN", "also shown");

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert!(!capture.contains("hidden"));
}
