//! Notification channels and how runs feed them.

mod common;

use common::{aged_file, capturing_logger, silent_logger};
use std::fs;
use std::time::SystemTime;
use tempfile::TempDir;
use wp_prune::config::NotifyConfig;
use wp_prune::notify::{self, CommandNotifier, StatusFileNotifier};
use wp_prune::{CleanupRunner, Notification, Notifier, RetentionPolicy, Severity};

fn status_lines(path: &std::path::Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn status_file_appends_one_json_object_per_notification() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/status.jsonl");
    let notifier = StatusFileNotifier::new(&path);

    notifier
        .notify(&Notification::new(Severity::Success, "first", "ok"))
        .unwrap();
    notifier
        .notify(
            &Notification::new(Severity::Warning, "second", "partial")
                .attachment("/var/log/run.log"),
        )
        .unwrap();

    let lines = status_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["severity"], "success");
    assert_eq!(lines[0]["title"], "first");
    assert!(lines[0].get("attachment").is_none());
    assert_eq!(lines[1]["severity"], "warning");
    assert_eq!(lines[1]["attachment"], "/var/log/run.log");
    assert_ne!(lines[0]["id"], lines[1]["id"]);
}

#[cfg(unix)]
#[test]
fn command_hook_sees_environment() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("hook.txt");
    let notifier = CommandNotifier::new(format!(
        "printf '%s|%s|%s' \"$WP_PRUNE_SEVERITY\" \"$WP_PRUNE_TITLE\" \"$WP_PRUNE_ATTACHMENT\" > '{}'",
        out.display()
    ));

    notifier
        .notify(&Notification::new(Severity::Info, "dry", "body").attachment("/tmp/run.log"))
        .unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "info|dry|/tmp/run.log");
}

#[cfg(unix)]
#[test]
fn command_hook_reads_result_from_a_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("result.json");
    let path_out = dir.path().join("result.path");
    let notifier = CommandNotifier::new(format!(
        "cat \"$WP_PRUNE_RESULT_FILE\" > '{}'; printf '%s' \"$WP_PRUNE_RESULT_FILE\" > '{}'",
        out.display(),
        path_out.display()
    ));

    let deleted: Vec<String> = (0..5000)
        .map(|i| format!("/var/backups/shop/backup-{i:05}.tar.gz"))
        .collect();
    let payload = serde_json::json!({ "deleted": deleted });
    notifier
        .notify(&Notification::new(Severity::Success, "t", "m").payload(payload.clone()))
        .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, payload);
    let temp = fs::read_to_string(&path_out).unwrap();
    assert!(!std::path::Path::new(&temp).exists());
}

#[cfg(unix)]
#[test]
fn failing_hook_is_an_error() {
    let notifier = CommandNotifier::new("echo nope >&2; exit 3");
    let err = notifier
        .notify(&Notification::new(Severity::Info, "t", "m"))
        .unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[cfg(unix)]
#[test]
fn dispatch_logs_failures_and_counts_deliveries() {
    let dir = TempDir::new().unwrap();
    let notifiers: Vec<Box<dyn Notifier>> = vec![
        Box::new(CommandNotifier::new("exit 1")),
        Box::new(StatusFileNotifier::new(dir.path().join("s.jsonl"))),
    ];

    let (logger, capture) = capturing_logger();
    let delivered = notify::dispatch(
        &notifiers,
        &Notification::new(Severity::Success, "t", "m"),
        &logger,
    );

    assert_eq!(delivered, 1);
    assert!(capture.contains("command failed"));
}

#[test]
fn disabled_config_builds_no_channels() {
    let config = NotifyConfig {
        enabled: false,
        status_file: Some("/tmp/x.jsonl".to_string()),
        command: Some("true".to_string()),
    };
    assert!(notify::from_config(&config).is_empty());

    let config = NotifyConfig {
        enabled: true,
        ..config
    };
    assert_eq!(notify::from_config(&config).len(), 2);
}

#[test]
fn run_result_reaches_status_file() {
    let dir = TempDir::new().unwrap();
    let locks = TempDir::new().unwrap();
    let status = TempDir::new().unwrap();
    let status_path = status.path().join("status.jsonl");
    let now = SystemTime::now();
    aged_file(dir.path(), "old.zip", 64, 40, now);

    let logger = silent_logger();
    CleanupRunner::new(
        RetentionPolicy::new(dir.path())
            .retain_days(30)
            .safe_path(dir.path()),
        &logger,
    )
    .lock_dir(locks.path())
    .notifier(StatusFileNotifier::new(&status_path))
    .now(now)
    .run(true, false)
    .unwrap();

    let lines = status_lines(&status_path);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["severity"], "info");
    assert_eq!(lines[0]["result"]["dry_run"], true);
    assert_eq!(lines[0]["result"]["archives_deleted_count"], 1);
    assert_eq!(lines[0]["result"]["archives_bytes_freed"], 64);
}

#[test]
fn fatal_errors_are_notified() {
    let locks = TempDir::new().unwrap();
    let status = TempDir::new().unwrap();
    let status_path = status.path().join("status.jsonl");

    let logger = silent_logger();
    let result = CleanupRunner::new(
        RetentionPolicy::new("/etc")
            .retain_days(30)
            .safe_path("/var/backups"),
        &logger,
    )
    .lock_dir(locks.path())
    .notifier(StatusFileNotifier::new(&status_path))
    .run(false, false);
    assert!(result.is_err());

    let lines = status_lines(&status_path);
    assert_eq!(lines[0]["severity"], "error");
    assert!(lines[0]["message"].as_str().unwrap().contains("/etc"));
    assert_eq!(lines[0]["result"]["error"], "safety-violation");
    assert_eq!(lines[0]["result"]["exit_code"], 2);
}

#[cfg(unix)]
#[test]
fn failing_channel_does_not_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let locks = TempDir::new().unwrap();
    let now = SystemTime::now();
    let file = aged_file(dir.path(), "old.zip", 10, 40, now);

    let logger = silent_logger();
    let result = CleanupRunner::new(
        RetentionPolicy::new(dir.path())
            .retain_days(30)
            .safe_path(dir.path()),
        &logger,
    )
    .lock_dir(locks.path())
    .notifier(CommandNotifier::new("exit 42"))
    .now(now)
    .run(false, false)
    .unwrap();

    assert_eq!(result.total_deleted(), 1);
    assert!(!file.exists());
}
