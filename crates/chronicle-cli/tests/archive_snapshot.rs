//! CLI integration tests against a snapshot directory.
//!
//! Every test builds its own snapshot and output directory in a tempdir, so
//! they run offline and in parallel.

mod common;

use std::fs;

use tempfile::TempDir;

use common::*;

struct Workspace {
    _dir: TempDir,
    snapshot: std::path::PathBuf,
    output: std::path::PathBuf,
    config: std::path::PathBuf,
}

fn workspace(config: serde_json::Value) -> Workspace {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("snapshot");
    fs::create_dir_all(&snapshot).unwrap();
    build_snapshot(&snapshot);
    let config = write_config(dir.path(), config);
    let output = dir.path().join("logs");
    Workspace {
        snapshot,
        output,
        config,
        _dir: dir,
    }
}

fn archive_args(ws: &Workspace) -> Vec<String> {
    vec![
        "--config".into(),
        ws.config.display().to_string(),
        "--output".into(),
        ws.output.display().to_string(),
        "--source".into(),
        file_source(&ws.snapshot),
    ]
}

fn run_archive(ws: &Workspace) -> std::process::Output {
    let args = archive_args(ws);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run_cli(&args)
}

#[test]
fn test_archives_snapshot() {
    let ws = workspace(default_config());
    let args = archive_args(&ws);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let stdout = run_cli_success(&args);

    assert!(stdout.contains("Archiving #general (100)"), "stdout: {}", stdout);
    assert!(stdout.contains("Skipping #old-news (200) in Archive"), "stdout: {}", stdout);
    assert!(stdout.contains("Archival complete."), "stdout: {}", stdout);

    let general = read_archive(&ws.output.join("messages/general.100.json"));
    let contents: Vec<&str> = general.iter().map(|m| m["content"].as_str().unwrap()).collect();
    assert_eq!(contents, ["first", "second", "third"]);
    assert_eq!(general[0]["created_at"], "2021-01-01 00:00:00.000000+00:00");
    assert_eq!(general[0]["author"]["name"], "alice#0");
    assert_eq!(general[0]["channel"]["name"], "general");

    assert!(!ws.output.join("messages/old-news.200.json").exists());

    let bans = read_archive(&ws.output.join("audit_logs/ban.json"));
    assert_eq!(bans.len(), 2);
    assert_eq!(bans[0]["created_at"], "2021-01-01 00:03:00.000000+00:00");
    assert_eq!(bans[0]["type"], "audit");
    assert_eq!(bans[0]["action"], "ban");
    assert_eq!(bans[0]["reason"], "spam");
    assert_eq!(bans[0]["target"]["type"], "Member");

    // Actions with no entries still get a file.
    assert!(read_archive(&ws.output.join("audit_logs/kick.json")).is_empty());

    assert_eq!(read_archive(&ws.output.join("messages/__all__.json")).len(), 3);
    assert_eq!(read_archive(&ws.output.join("audit_logs/__all__.json")).len(), 2);
}

#[test]
fn test_rerun_is_byte_identical() {
    let ws = workspace(default_config());
    assert!(run_archive(&ws).status.success());
    let first = fs::read(ws.output.join("messages/general.100.json")).unwrap();
    let first_audit = fs::read(ws.output.join("audit_logs/__all__.json")).unwrap();

    assert!(run_archive(&ws).status.success());
    assert_eq!(fs::read(ws.output.join("messages/general.100.json")).unwrap(), first);
    assert_eq!(fs::read(ws.output.join("audit_logs/__all__.json")).unwrap(), first_audit);
}

#[test]
fn test_disabled_phases_write_nothing() {
    let mut config = default_config();
    config["log_audit_logs"] = false.into();
    config["log_to_all"] = false.into();
    let ws = workspace(config);

    assert!(run_archive(&ws).status.success());
    assert!(ws.output.join("messages/general.100.json").exists());
    assert!(!ws.output.join("messages/__all__.json").exists());
    assert!(!ws.output.join("audit_logs").exists());
}

#[test]
fn test_missing_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let output = run_cli(&["--config", &missing.display().to_string()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_guild_exits_1() {
    let mut config = default_config();
    config["guild"] = "42".into();
    let ws = workspace(config);

    let output = run_archive(&ws);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("guild 42 not found"), "stderr: {}", stderr);
    assert!(!ws.output.join("messages").exists());
}

#[test]
fn test_wrong_token_exits_1() {
    let mut config = default_config();
    config["token"] = "not-the-token".into();
    let ws = workspace(config);

    let output = run_archive(&ws);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("token rejected"), "stderr: {}", stderr);
}

#[test]
fn test_failed_channel_exits_2() {
    let mut config = default_config();
    config["categories_to_skip"] = serde_json::json!([]);
    let ws = workspace(config);
    fs::write(ws.snapshot.join("messages/200.json"), b"{ not json").unwrap();

    let output = run_archive(&ws);
    assert_eq!(output.status.code(), Some(2));

    // The broken channel has no file; its sibling is untouched by the failure.
    assert!(!ws.output.join("messages/old-news.200.json").exists());
    assert_eq!(read_archive(&ws.output.join("messages/general.100.json")).len(), 3);
    // The audit phase still ran.
    assert_eq!(read_archive(&ws.output.join("audit_logs/ban.json")).len(), 2);
}
