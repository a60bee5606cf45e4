//! Raw items as produced by a remote.
//!
//! These are the inputs to the normalizer. Remote adapters translate whatever
//! their transport speaks into these types; nothing transport-specific crosses
//! into [`crate::record`]. All raw types are serde-enabled so snapshot remotes
//! can persist them verbatim.

mod target;

use serde::{Deserialize, Serialize};

use crate::types::{AuditAction, Snowflake, Timestamp};

pub use target::{RawInvite, RawMember, RawRole, RawTarget};

fn default_discriminator() -> String {
    "0".to_string()
}

/// A user as seen by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: Snowflake,
    pub name: String,
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    #[serde(default)]
    pub bot: bool,
}

/// Anything identified by an id and a name (channels, guilds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRef {
    pub id: Snowflake,
    pub name: String,
}

/// Numeric message type.
///
/// Kept open-ended: unknown values survive normalization as `unknown_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageKind(pub u8);

impl MessageKind {
    pub const DEFAULT: Self = Self(0);
    pub const RECIPIENT_ADD: Self = Self(1);
    pub const RECIPIENT_REMOVE: Self = Self(2);
    pub const CALL: Self = Self(3);
    pub const CHANNEL_NAME_CHANGE: Self = Self(4);
    pub const CHANNEL_ICON_CHANGE: Self = Self(5);
    pub const PINS_ADD: Self = Self(6);
    pub const NEW_MEMBER: Self = Self(7);
    pub const PREMIUM_GUILD_SUBSCRIPTION: Self = Self(8);
    pub const PREMIUM_GUILD_TIER_1: Self = Self(9);
    pub const PREMIUM_GUILD_TIER_2: Self = Self(10);
    pub const PREMIUM_GUILD_TIER_3: Self = Self(11);
    pub const CHANNEL_FOLLOW_ADD: Self = Self(12);
    pub const THREAD_CREATED: Self = Self(18);
    pub const REPLY: Self = Self(19);

    /// The snake_case type name written to archives.
    pub fn name(self) -> String {
        let known = match self.0 {
            0 => "default",
            1 => "recipient_add",
            2 => "recipient_remove",
            3 => "call",
            4 => "channel_name_change",
            5 => "channel_icon_change",
            6 => "pins_add",
            7 => "new_member",
            8 => "premium_guild_subscription",
            9 => "premium_guild_tier_1",
            10 => "premium_guild_tier_2",
            11 => "premium_guild_tier_3",
            12 => "channel_follow_add",
            14 => "guild_discovery_disqualified",
            15 => "guild_discovery_requalified",
            16 => "guild_discovery_grace_period_initial_warning",
            17 => "guild_discovery_grace_period_final_warning",
            18 => "thread_created",
            19 => "reply",
            20 => "chat_input_command",
            21 => "thread_starter_message",
            22 => "guild_invite_reminder",
            23 => "context_menu_command",
            24 => "auto_moderation_action",
            25 => "role_subscription_purchase",
            26 => "interaction_premium_upsell",
            27 => "stage_start",
            28 => "stage_end",
            29 => "stage_speaker",
            31 => "stage_topic",
            32 => "guild_application_premium_subscription",
            other => return format!("unknown_{}", other),
        };
        known.to_string()
    }
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttachment {
    pub id: Snowflake,
    pub filename: String,
    pub size: u64,
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// A rich embed.
///
/// Only title, description and url are archived; the remaining fields decide
/// whether the embed is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmbed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub fields: Vec<serde_json::Value>,
    #[serde(default)]
    pub author: Option<serde_json::Value>,
    #[serde(default)]
    pub footer: Option<serde_json::Value>,
    #[serde(default)]
    pub image: Option<serde_json::Value>,
    #[serde(default)]
    pub thumbnail: Option<serde_json::Value>,
    #[serde(default)]
    pub video: Option<serde_json::Value>,
    #[serde(default)]
    pub provider: Option<serde_json::Value>,
}

impl RawEmbed {
    /// Returns true if the embed carries nothing at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.color.is_none()
            && self.timestamp.is_none()
            && self.fields.is_empty()
            && self.author.is_none()
            && self.footer.is_none()
            && self.image.is_none()
            && self.thumbnail.is_none()
            && self.video.is_none()
            && self.provider.is_none()
    }
}

/// A unicode or custom emoji.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Emoji {
    #[serde(default)]
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl Emoji {
    /// A unicode emoji.
    pub fn unicode(symbol: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(symbol.into()),
            animated: false,
        }
    }

    /// Render as message markup: the symbol itself, or `<:name:id>` for custom
    /// emoji (`<a:name:id>` when animated).
    pub fn render(&self) -> String {
        let name = self.name.as_deref().unwrap_or("_");
        match self.id {
            None => name.to_string(),
            Some(id) if self.animated => format!("<a:{}:{}>", name, id),
            Some(id) => format!("<:{}:{}>", name, id),
        }
    }
}

/// Reaction summary on a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReaction {
    pub emoji: Emoji,
    pub count: u32,
}

/// A message from a channel history.
///
/// The creation time is encoded in `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: Snowflake,
    pub channel: RawRef,
    /// Guild the channel belongs to, if the remote reports it.
    #[serde(default)]
    pub guild: Option<RawRef>,
    pub author: RawUser,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub edited_at: Option<Timestamp>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
    #[serde(default)]
    pub embeds: Vec<RawEmbed>,
    #[serde(default)]
    pub reactions: Vec<RawReaction>,
    #[serde(default)]
    pub mentions: Vec<RawUser>,
}

impl RawMessage {
    /// Creation time.
    pub fn created_at(&self) -> Timestamp {
        self.id.created_at()
    }
}

/// One changed attribute on an audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChange {
    pub key: String,
    #[serde(default)]
    pub old_value: Option<serde_json::Value>,
    #[serde(default)]
    pub new_value: Option<serde_json::Value>,
}

/// An audit log entry.
///
/// The creation time is encoded in `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAuditEntry {
    pub id: Snowflake,
    pub action: AuditAction,
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub target: Option<RawTarget>,
    #[serde(default)]
    pub changes: Vec<RawChange>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub options: Option<serde_json::Map<String, serde_json::Value>>,
}

impl RawAuditEntry {
    /// Creation time.
    pub fn created_at(&self) -> Timestamp {
        self.id.created_at()
    }
}
