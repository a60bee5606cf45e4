//! Config file loading.
//!
//! Recognized keys:
//!
//! ```json
//! {
//!   "guild": 123456789012345678,
//!   "token": "bot token",
//!   "log_messages": true,
//!   "log_audit_logs": true,
//!   "log_to_all": false,
//!   "categories_to_skip": ["Archive"]
//! }
//! ```
//!
//! `output_dir` and `source` are optional extensions; the CLI flags override
//! both.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use chronicle_core::config::DEFAULT_OUTPUT_DIR;
use chronicle_core::error::ConfigError;
use chronicle_core::{ArchiveConfig, Credential, Snowflake, SourceUrl};

/// A guild id written either as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum GuildId {
    Number(u64),
    Text(String),
}

fn default_true() -> bool {
    true
}

/// The config file as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    guild: GuildId,
    token: String,
    #[serde(default = "default_true")]
    log_messages: bool,
    #[serde(default = "default_true")]
    log_audit_logs: bool,
    #[serde(default)]
    log_to_all: bool,
    #[serde(default)]
    categories_to_skip: Vec<String>,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    source: Option<String>,
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub source: Option<String>,
}

impl FileConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::Missing {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::parse(&contents)
    }

    /// Parse a config document.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|e| ConfigError::Malformed {
            message: e.to_string(),
        })
    }

    /// Validate into a run configuration and the source to archive from.
    pub fn resolve(self, overrides: Overrides) -> Result<(ArchiveConfig, SourceUrl), ConfigError> {
        let community_id = match self.guild {
            GuildId::Number(id) => Snowflake::new(id),
            GuildId::Text(text) => {
                Snowflake::parse(text.trim()).map_err(|e| ConfigError::Invalid {
                    field: "guild",
                    reason: e.to_string(),
                })?
            }
        };

        let credential = Credential::new(self.token.trim());
        if credential.is_blank() {
            return Err(ConfigError::Invalid {
                field: "token",
                reason: "must not be empty".into(),
            });
        }

        let source = match overrides.source.or(self.source) {
            Some(source) => SourceUrl::new(&source).map_err(|e| ConfigError::Invalid {
                field: "source",
                reason: e.to_string(),
            })?,
            None => SourceUrl::default_api(),
        };

        let mut config = ArchiveConfig::new(community_id, credential);
        config.log_messages = self.log_messages;
        config.log_audit_logs = self.log_audit_logs;
        config.aggregate = self.log_to_all;
        config.categories_to_skip = self.categories_to_skip.into_iter().collect();
        config.output_dir = overrides
            .output_dir
            .or(self.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok((config, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_original_keys() {
        let file = FileConfig::parse(
            r#"{
                "guild": 81384788765712384,
                "token": "secret",
                "log_messages": true,
                "log_audit_logs": false,
                "log_to_all": true,
                "categories_to_skip": ["Archive", "Voice"]
            }"#,
        )
        .unwrap();
        let (config, source) = file.resolve(Overrides::default()).unwrap();

        assert_eq!(config.community_id, Snowflake::new(81384788765712384));
        assert_eq!(config.credential.as_str(), "secret");
        assert!(config.log_messages);
        assert!(!config.log_audit_logs);
        assert!(config.aggregate);
        assert!(config.categories_to_skip.contains("Voice"));
        assert_eq!(config.output_dir, PathBuf::from("logs"));
        assert_eq!(source, SourceUrl::default_api());
    }

    #[test]
    fn guild_may_be_a_string() {
        let file = FileConfig::parse(r#"{"guild": "42", "token": "t"}"#).unwrap();
        let (config, _) = file.resolve(Overrides::default()).unwrap();
        assert_eq!(config.community_id, Snowflake::new(42));
        assert!(config.log_messages);
        assert!(!config.aggregate);
    }

    #[test]
    fn rejects_non_numeric_guild() {
        let file = FileConfig::parse(r#"{"guild": "my-server", "token": "t"}"#).unwrap();
        let err = file.resolve(Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "guild", .. }));
    }

    #[test]
    fn rejects_blank_token() {
        let file = FileConfig::parse(r#"{"guild": 1, "token": "   "}"#).unwrap();
        let err = file.resolve(Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "token", .. }));
    }

    #[test]
    fn missing_token_is_malformed() {
        let err = FileConfig::parse(r#"{"guild": 1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let file = FileConfig::parse(
            r#"{"guild": 1, "token": "t", "output_dir": "from-file",
                "source": "https://discord.com/api/v9"}"#,
        )
        .unwrap();
        let (config, source) = file
            .resolve(Overrides {
                output_dir: Some(PathBuf::from("from-cli")),
                source: Some("file:///tmp/snapshot".into()),
            })
            .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("from-cli"));
        assert!(source.is_local());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }
}
