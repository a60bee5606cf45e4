//! Filesystem storage for guild snapshots.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use chronicle_core::error::{Error, FetchError};
use chronicle_core::raw::{RawAuditEntry, RawMessage};
use chronicle_core::{AuditAction, Channel, Result, Snowflake};

fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Fetch(FetchError::Storage {
        message: format!("{}: {}", path.display(), err),
    })
}

fn map_json(path: &Path, err: serde_json::Error) -> Error {
    Error::Fetch(FetchError::Decode {
        message: format!("{}: {}", path.display(), err),
    })
}

/// Contents of `guild.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotGuild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// Reader and writer for one snapshot directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn guild_path(&self) -> PathBuf {
        self.root.join("guild.json")
    }

    fn token_path(&self) -> PathBuf {
        self.root.join("token")
    }

    fn messages_path(&self, channel: Snowflake) -> PathBuf {
        self.root.join("messages").join(format!("{}.json", channel))
    }

    fn audit_path(&self, action: AuditAction) -> PathBuf {
        self.root.join("audit_logs").join(format!("{}.json", action.name()))
    }

    /// Read a JSON file; `Ok(None)` if it does not exist.
    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(path, e)),
        };
        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|e| map_json(path, e))
    }

    fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }
        let content = serde_json::to_vec_pretty(value).map_err(|e| map_json(path, e))?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(|e| map_io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| map_io(path, e))?;

        debug!(path = %path.display(), "Wrote snapshot file");
        Ok(())
    }

    // ========================================================================
    // Reading
    // ========================================================================

    pub fn guild(&self) -> Result<Option<SnapshotGuild>> {
        Self::read_json(&self.guild_path())
    }

    /// The credential this snapshot expects, if it names one.
    pub fn expected_token(&self) -> Result<Option<String>> {
        let path = self.token_path();
        match fs::read_to_string(&path) {
            Ok(token) => Ok(Some(token.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io(&path, e)),
        }
    }

    #[instrument(skip(self))]
    pub fn messages(&self, channel: Snowflake) -> Result<Vec<RawMessage>> {
        Ok(Self::read_json(&self.messages_path(channel))?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub fn audit_entries(&self, action: AuditAction) -> Result<Vec<RawAuditEntry>> {
        Ok(Self::read_json(&self.audit_path(action))?.unwrap_or_default())
    }

    // ========================================================================
    // Writing
    // ========================================================================

    pub fn write_guild(&self, guild: &SnapshotGuild) -> Result<()> {
        Self::write_json(&self.guild_path(), guild)
    }

    pub fn write_token(&self, token: &str) -> Result<()> {
        let path = self.token_path();
        fs::create_dir_all(&self.root).map_err(|e| map_io(&self.root, e))?;
        fs::write(&path, token).map_err(|e| map_io(&path, e))
    }

    pub fn write_messages(&self, channel: Snowflake, messages: &[RawMessage]) -> Result<()> {
        Self::write_json(&self.messages_path(channel), messages)
    }

    pub fn write_audit_entries(&self, action: AuditAction, entries: &[RawAuditEntry]) -> Result<()> {
        Self::write_json(&self.audit_path(action), entries)
    }
}
