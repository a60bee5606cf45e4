//! Core identifier and value types.
//!
//! These types enforce their invariants at construction time.

mod audit_action;
mod snowflake;
mod source_url;
mod timestamp;

pub use audit_action::{AuditAction, TargetCategory};
pub use snowflake::Snowflake;
pub use source_url::SourceUrl;
pub use timestamp::Timestamp;
