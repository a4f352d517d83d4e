use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wp_prune::config::RetentionOverrides;
use wp_prune::{Config, Error, Level, RetentionMode};

#[test]
fn missing_file_yields_defaults() {
    let tmp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&tmp_dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.retention.mode, RetentionMode::Time);
    assert!(config.retention.disk_free_enabled);
    assert!(config.retention.canonicalize_paths);
    assert!(config.notify.enabled);
    assert_eq!(config.parse_level(), Level::Info);
    assert!(config.retention.safe_paths.iter().any(|p| p == "/var/backups"));
}

#[test]
fn full_file_parses() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[general]
level = "debug"
quiet = true

[terminal]
colors = false

[file]
enabled = false

[retention]
target_dir = "/var/backups/example.com"
mode = "both"
retain_days = 14
min_free_gib = 20
max_log_size = "10M"
archive_extensions = ["zip", "tar.gz"]
safe_paths = ["/var/backups"]

[notify]
status_file = "/var/log/wp-prune/status.jsonl"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level(), Level::Debug);
    assert!(config.general.quiet);
    assert!(!config.file.enabled);

    let policy = config.retention_policy().unwrap();
    assert_eq!(policy.mode, RetentionMode::Both);
    assert_eq!(policy.retain_days, 14);
    assert_eq!(policy.min_free_gib, 20);
    assert_eq!(policy.max_log_size_bytes, 10 * 1024 * 1024);
    assert_eq!(policy.archive_extensions, vec!["zip", "tar.gz"]);
    assert_eq!(policy.safe_path_prefixes, vec![PathBuf::from("/var/backups")]);
}

#[test]
fn unknown_keys_are_rejected() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("config.toml");
    fs::write(&path, "[retention]\nretain_dayz = 3\n").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(Error::ConfigParse(_))
    ));
}

#[test]
fn unknown_mode_is_rejected() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("config.toml");
    fs::write(&path, "[retention]\nmode = \"forever\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn sources_fill_gaps_but_do_not_override() {
    let tmp_dir = TempDir::new().unwrap();
    let base_path = tmp_dir.path().join("base.toml");
    let child_path = tmp_dir.path().join("child.toml");

    fs::write(
        &base_path,
        format!(
            "source = \"{}\"\n\n[retention]\nretain_days = 7\n",
            child_path.display()
        ),
    )
    .unwrap();
    fs::write(
        &child_path,
        r#"
[retention]
retain_days = 90
target_dir = "/var/backups/shared"

[sites.blog]
target_dir = "/var/backups/blog"
"#,
    )
    .unwrap();

    let config = Config::load_from(&base_path).unwrap();
    assert_eq!(config.retention.retain_days, Some(7));
    assert_eq!(
        config.retention.target_dir.as_deref(),
        Some("/var/backups/shared")
    );
    assert!(config.sites.contains_key("blog"));
}

#[test]
fn relative_source_resolves_next_to_including_file() {
    let tmp_dir = TempDir::new().unwrap();
    fs::create_dir(tmp_dir.path().join("conf.d")).unwrap();
    let base_path = tmp_dir.path().join("config.toml");
    fs::write(&base_path, "source = \"conf.d/sites.toml\"\n").unwrap();
    fs::write(
        tmp_dir.path().join("conf.d/sites.toml"),
        "[sites.shop]\nretain_days = 3\n",
    )
    .unwrap();

    let config = Config::load_from(&base_path).unwrap();
    assert_eq!(config.sites["shop"].retain_days, Some(3));
}

#[test]
fn missing_source_is_a_warning() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("config.toml");
    fs::write(&path, "source = \"/nonexistent/wp-prune.toml\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.warnings.len(), 1);
    assert!(config.warnings[0].contains("/nonexistent/wp-prune.toml"));
}

#[test]
fn load_with_sources_detects_cycles() {
    let tmp_dir = TempDir::new().unwrap();
    let a_path = tmp_dir.path().join("a.toml");
    let b_path = tmp_dir.path().join("b.toml");

    fs::write(&a_path, format!("source = \"{}\"\n", b_path.display())).unwrap();
    fs::write(&b_path, format!("source = \"{}\"\n", a_path.display())).unwrap();

    let result = Config::load_from(&a_path);
    assert!(matches!(result, Err(Error::CyclicInclude(_))));
}

#[test]
fn shared_include_from_two_files_is_not_a_cycle() {
    let tmp_dir = TempDir::new().unwrap();
    let dir = tmp_dir.path();
    fs::write(dir.join("common.toml"), "[retention]\nretain_days = 14\n").unwrap();
    fs::write(dir.join("a.toml"), "source = \"common.toml\"\n").unwrap();
    fs::write(dir.join("b.toml"), "source = \"common.toml\"\n").unwrap();
    let path = dir.join("config.toml");
    fs::write(&path, "source = \"a.toml\"\nsource = \"b.toml\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.retention.retain_days, Some(14));
    assert!(config.warnings.is_empty());
}

#[test]
fn site_overrides_apply_on_top_of_retention() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[retention]
target_dir = "/var/backups/default"
retain_days = 30

[sites.shop]
target_dir = "/var/backups/shop"
mode = "space"
min_free_gib = 50
level = "warn"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap().for_site("shop").unwrap();
    assert_eq!(config.parse_level(), Level::Warn);

    let policy = config.retention_policy().unwrap();
    assert_eq!(policy.target(), Path::new("/var/backups/shop"));
    assert_eq!(policy.mode, RetentionMode::Space);
    assert_eq!(policy.min_free_gib, 50);
}

#[test]
fn unknown_site_is_an_error() {
    let config = Config::default();
    assert!(matches!(
        config.for_site("nope"),
        Err(Error::SiteNotFound(name)) if name == "nope"
    ));
}

#[test]
fn cli_overrides_win_over_site() {
    let mut config = Config::default();
    config.sites.insert(
        "blog".to_string(),
        RetentionOverrides {
            target_dir: Some("/var/backups/blog".to_string()),
            retain_days: Some(60),
            ..RetentionOverrides::default()
        },
    );

    let mut config = config.for_site("blog").unwrap();
    config.apply(&RetentionOverrides {
        retain_days: Some(5),
        ..RetentionOverrides::default()
    });

    let policy = config.retention_policy().unwrap();
    assert_eq!(policy.retain_days, 5);
    assert_eq!(policy.target(), Path::new("/var/backups/blog"));
}

#[test]
fn policy_requires_target_and_mode_inputs() {
    let mut config = Config::default();
    assert!(matches!(
        config.retention_policy(),
        Err(Error::InvalidConfig(_))
    ));

    config.retention.target_dir = Some("/var/backups/site".to_string());
    assert!(
        config.retention_policy().is_err(),
        "time mode without retain_days"
    );

    config.retention.retain_days = Some(30);
    assert!(config.retention_policy().is_ok());

    config.retention.target_dir = Some("relative/site".to_string());
    assert!(config.retention_policy().is_err());
}

#[test]
fn bad_log_size_is_invalid_config() {
    let mut config = Config::default();
    config.retention.target_dir = Some("/var/backups/site".to_string());
    config.retention.retain_days = Some(30);
    config.retention.max_log_size = Some("lots".to_string());

    let err = config.retention_policy().unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn tilde_in_safe_paths_is_expanded() {
    let mut config = Config::default();
    config.retention.target_dir = Some("/var/backups/site".to_string());
    config.retention.retain_days = Some(30);
    config.retention.safe_paths = vec!["~/backups".to_string()];

    let policy = config.retention_policy().unwrap();
    assert!(
        policy
            .safe_path_prefixes
            .iter()
            .all(|p| !p.to_string_lossy().starts_with('~'))
    );
}
