//! Error types for chronicle.
//!
//! One unified error type with explicit variants per failure class. The
//! archivers use [`Error::is_unit_scoped`] to decide whether a failure stops
//! only the current channel or audit action, or the whole run.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Snowflake;

/// The unified error type for chronicle operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input validation errors (invalid snowflake, source URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The configured guild does not exist or is not visible to the credential.
    #[error("guild {id} not found")]
    CommunityNotFound { id: Snowflake },

    /// Remote retrieval failed while paging through a history.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A raw item could not be turned into a record.
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// A normalized record failed to encode.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Writing an archive file failed.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Uncategorized failure at the connection level.
    #[error("connection error: {message}")]
    Connection { message: String },
}

impl Error {
    /// Returns true if this error only invalidates the unit being archived.
    pub fn is_unit_scoped(&self) -> bool {
        matches!(
            self,
            Error::Fetch(_) | Error::Normalize(_) | Error::Serialization(_) | Error::Output { .. }
        )
    }

    /// Create a connection error from any displayable cause.
    pub fn connection(message: impl fmt::Display) -> Self {
        Error::Connection {
            message: message.to_string(),
        }
    }
}

/// Configuration errors, raised before any remote work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("config file {} not found", path.display())]
    Missing { path: PathBuf },

    /// The configuration file could not be read.
    #[error("failed to read config file {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    /// The configuration document is malformed.
    #[error("malformed config: {message}")]
    Malformed { message: String },

    /// A field has an unusable value.
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid snowflake identifier.
    #[error("invalid snowflake '{value}': {reason}")]
    Snowflake { value: String, reason: String },

    /// Invalid source URL.
    #[error("invalid source URL '{value}': {reason}")]
    SourceUrl { value: String, reason: String },

    /// Unknown audit action name or code.
    #[error("unknown audit action '{value}'")]
    AuditAction { value: String },
}

/// Failures while retrieving from a remote.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Transport { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The remote answered with an error status.
    #[error("{0}")]
    Protocol(ProtocolError),

    /// The response body could not be decoded.
    #[error("could not decode response: {message}")]
    Decode { message: String },

    /// The remote kept rate limiting the request.
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// A snapshot file could not be read.
    #[error("snapshot read failed: {message}")]
    Storage { message: String },
}

/// API error code for a resource the credential cannot see.
pub const MISSING_ACCESS: u64 = 50001;

/// An error status returned by the remote API.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// API error code, if the body carried one.
    pub code: Option<u64>,
    /// Error message from the remote.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, code: Option<u64>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Check if the remote rejected the credential.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if the credential lacks access to the resource (the bot is not
    /// a member of the guild).
    pub fn is_missing_access(&self) -> bool {
        self.status == 403 && self.code == Some(MISSING_ACCESS)
    }
}

/// A raw item that could not be normalized.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Invite targets nested deeper than the normalizer allows.
    #[error("audit target nested deeper than {max} levels")]
    TargetTooDeep { max: usize },
}

/// A normalized record that failed its encode check.
#[derive(Debug, Error)]
#[error("record {id} could not be encoded: {message}")]
pub struct SerializationError {
    /// Identifier of the offending record.
    pub id: String,
    /// Encoder message.
    pub message: String,
}
