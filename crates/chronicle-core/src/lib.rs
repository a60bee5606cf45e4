//! chronicle-core - Core types, traits and the archival pipeline.
//!
//! The pipeline pulls a guild's complete message history and audit log from a
//! [`Remote`], normalizes every raw item into a JSON-safe [`Record`], and writes
//! timestamp-ordered archive files per channel, per audit action, and
//! optionally across all of them.

pub mod archive;
pub mod config;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod normalize;
pub mod raw;
pub mod record;
pub mod run;
pub mod traits;
pub mod types;

pub use archive::{PhaseReport, UnitFailure};
pub use config::ArchiveConfig;
pub use credentials::Credential;
pub use error::Error;
pub use record::{AuditRecord, MessageRecord, Record, TargetDescription};
pub use run::{RunReport, RunState, run};
pub use traits::{Channel, Community, NoProgress, Order, Pages, Phase, Progress, Remote, Session, Unit};
pub use types::{AuditAction, Snowflake, SourceUrl, Timestamp};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
