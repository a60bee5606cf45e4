//! Raw audit log targets.

use serde::{Deserialize, Serialize};

use super::{RawRef, RawUser};
use crate::types::{Snowflake, Timestamp};

/// A guild member: a user plus guild-specific state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMember {
    pub user: RawUser,
    #[serde(default)]
    pub nick: Option<String>,
}

/// A role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRole {
    pub id: Snowflake,
    pub name: String,
}

/// An invite, as reconstructed from an audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInvite {
    pub code: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub max_age: Option<u32>,
    #[serde(default)]
    pub temporary: Option<bool>,
    #[serde(default)]
    pub uses: Option<u32>,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub inviter: Option<Box<RawTarget>>,
    #[serde(default)]
    pub channel: Option<Box<RawTarget>>,
}

impl RawInvite {
    /// Public URL for this invite.
    pub fn url(&self) -> String {
        format!("https://discord.gg/{}", self.code)
    }
}

/// What an audit action was performed on.
///
/// Adapters classify targets in variant order: a value that could be read as
/// more than one kind takes the first that fits. `Other` is the fallback for
/// anything the adapter cannot classify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawTarget {
    User(RawUser),
    Member(RawMember),
    Channel(RawRef),
    Guild(RawRef),
    Object { id: Snowflake },
    Role(RawRole),
    Invite(RawInvite),
    Other { type_name: String, repr: String },
}

impl RawTarget {
    /// Fallback for a value of an unclassified type.
    pub fn other(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        RawTarget::Other {
            type_name: type_name.into(),
            repr: repr.into(),
        }
    }
}
