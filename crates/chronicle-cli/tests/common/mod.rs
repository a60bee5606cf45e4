use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chronicle_core::raw::{RawAuditEntry, RawMessage};
use chronicle_core::{AuditAction, Channel, Snowflake};
use chronicle_file::{SnapshotGuild, SnapshotStore};

pub const GUILD: u64 = 81384788765712384;
pub const TOKEN: &str = "snapshot-token";

/// 2021-01-01 00:00:00 UTC plus `minutes`.
pub fn at(minutes: u64) -> Snowflake {
    Snowflake::from_unix_millis(1_609_459_200_000 + minutes * 60_000, 0)
}

pub fn channel(id: u64, name: &str, category: Option<&str>, position: i64) -> Channel {
    Channel {
        id: Snowflake::new(id),
        name: name.into(),
        category: category.map(String::from),
        position,
    }
}

pub fn message(id: Snowflake, channel: &Channel, content: &str) -> RawMessage {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "channel": {"id": channel.id, "name": channel.name},
        "author": {"id": "3", "name": "alice", "discriminator": "0"},
        "content": content,
    }))
    .unwrap()
}

pub fn ban(id: Snowflake) -> RawAuditEntry {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "action": "ban",
        "user": {"id": "3", "name": "alice"},
        "target": {"kind": "member", "user": {"id": "4", "name": "mallory"}},
        "reason": "spam",
    }))
    .unwrap()
}

/// A snapshot with `#general` (3 messages), `#old-news` in the `Archive`
/// category (1 message) and two bans.
pub fn build_snapshot(root: &Path) -> SnapshotStore {
    let store = SnapshotStore::new(root);
    let general = channel(100, "general", Some("Public"), 0);
    let old_news = channel(200, "old-news", Some("Archive"), 1);

    store
        .write_guild(&SnapshotGuild {
            id: Snowflake::new(GUILD),
            name: "Rustaceans".into(),
            channels: vec![general.clone(), old_news.clone()],
        })
        .unwrap();
    store.write_token(TOKEN).unwrap();
    store
        .write_messages(
            general.id,
            &[
                message(at(2), &general, "third"),
                message(at(0), &general, "first"),
                message(at(1), &general, "second"),
            ],
        )
        .unwrap();
    store
        .write_messages(old_news.id, &[message(at(5), &old_news, "stale")])
        .unwrap();
    store
        .write_audit_entries(AuditAction::Ban, &[ban(at(4)), ban(at(3))])
        .unwrap();
    store
}

/// Write a config file and return its path.
pub fn write_config(dir: &Path, config: serde_json::Value) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, serde_json::to_vec_pretty(&config).unwrap()).unwrap();
    path
}

pub fn default_config() -> serde_json::Value {
    serde_json::json!({
        "guild": GUILD,
        "token": TOKEN,
        "log_messages": true,
        "log_audit_logs": true,
        "log_to_all": true,
        "categories_to_skip": ["Archive"],
    })
}

pub fn file_source(root: &Path) -> String {
    url::Url::from_directory_path(root).unwrap().to_string()
}

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chronicle"));
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Read an archive file as JSON.
pub fn read_archive(path: &Path) -> Vec<serde_json::Value> {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e));
    serde_json::from_slice(&bytes).unwrap()
}
