//! REST API paths and payloads.

use serde::Deserialize;

use chronicle_core::Snowflake;
use chronicle_core::types::Timestamp;

/// Largest page the API serves for messages and audit entries.
pub const PAGE_LIMIT: usize = 100;

/// Query string of requests that take no parameters.
pub const NO_QUERY: &[(&str, &str)] = &[];

pub const CURRENT_USER: &str = "users/@me";

pub fn guild(id: Snowflake) -> String {
    format!("guilds/{}", id)
}

pub fn guild_channels(id: Snowflake) -> String {
    format!("guilds/{}/channels", id)
}

pub fn channel_messages(id: Snowflake) -> String {
    format!("channels/{}/messages", id)
}

pub fn audit_logs(id: Snowflake) -> String {
    format!("guilds/{}/audit-logs", id)
}

/// Error body of a non-2xx response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a 429 response.
#[derive(Debug, Deserialize)]
pub struct RateLimitResponse {
    /// Seconds to wait before retrying.
    pub retry_after: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRole {
    pub id: Snowflake,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiGuild {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<ApiRole>,
}

/// Channel type codes.
pub mod channel_type {
    pub const TEXT: u8 = 0;
    pub const CATEGORY: u8 = 4;
    pub const ANNOUNCEMENT: u8 = 5;
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChannel {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
    #[serde(default)]
    pub position: i64,
}

#[derive(Debug, Deserialize)]
pub struct ApiAttachment {
    pub id: Snowflake,
    pub filename: String,
    pub size: u64,
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ApiReaction {
    pub count: u32,
    pub emoji: chronicle_core::raw::Emoji,
}

#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub id: Snowflake,
    pub author: ApiUser,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub edited_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub attachments: Vec<ApiAttachment>,
    #[serde(default)]
    pub embeds: Vec<chronicle_core::raw::RawEmbed>,
    #[serde(default)]
    pub reactions: Vec<ApiReaction>,
    #[serde(default)]
    pub mentions: Vec<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChange {
    pub key: String,
    #[serde(default)]
    pub old_value: Option<serde_json::Value>,
    #[serde(default)]
    pub new_value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ApiAuditEntry {
    pub id: Snowflake,
    pub action_type: u16,
    #[serde(default)]
    pub user_id: Option<Snowflake>,
    #[serde(default)]
    pub target_id: Option<Snowflake>,
    #[serde(default)]
    pub changes: Vec<ApiChange>,
    #[serde(default)]
    pub options: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiNamed {
    pub id: Snowflake,
    #[serde(default)]
    pub name: Option<String>,
}

/// One page of `GET guilds/{id}/audit-logs`.
#[derive(Debug, Deserialize)]
pub struct ApiAuditLog {
    #[serde(default)]
    pub audit_log_entries: Vec<ApiAuditEntry>,
    #[serde(default)]
    pub users: Vec<ApiUser>,
    #[serde(default)]
    pub webhooks: Vec<ApiNamed>,
    #[serde(default)]
    pub integrations: Vec<ApiNamed>,
    #[serde(default)]
    pub threads: Vec<ApiChannel>,
}
