//! Guild and channel descriptors.

use serde::{Deserialize, Serialize};

use crate::types::Snowflake;

/// A guild: the container of channels and audit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: Snowflake,
    pub name: String,
}

/// A text channel of a guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    /// Name of the category the channel sits in, if any.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub position: i64,
}
