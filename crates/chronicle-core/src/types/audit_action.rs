//! Audit log action taxonomy.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, InvalidInputError};

/// What kind of object an audit action is performed on.
///
/// Remote adapters use this to decide where to look up an entry's target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetCategory {
    /// The guild itself.
    Guild,
    /// A guild channel (including permission overwrites on it).
    Channel,
    /// A guild member.
    Member,
    /// A user who is not necessarily a member (message authors).
    User,
    /// A role.
    Role,
    /// An invite.
    Invite,
    /// A thread.
    Thread,
    /// Something only known by id (webhooks, emoji, stickers, ...).
    Object,
    /// The action has no target.
    Untargeted,
}

macro_rules! audit_actions {
    ($($variant:ident = $code:literal => $name:literal, $category:ident;)+) => {
        /// An audit log action type.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum AuditAction {
            $($variant,)+
        }

        impl AuditAction {
            /// Every action, in ascending code order.
            pub const ALL: &'static [AuditAction] = &[$(AuditAction::$variant,)+];

            /// The numeric action type used by the REST API.
            pub const fn code(self) -> u16 {
                match self {
                    $(AuditAction::$variant => $code,)+
                }
            }

            /// The snake_case name used in archive files and file names.
            pub const fn name(self) -> &'static str {
                match self {
                    $(AuditAction::$variant => $name,)+
                }
            }

            /// Where this action's target lives.
            pub const fn target_category(self) -> TargetCategory {
                match self {
                    $(AuditAction::$variant => TargetCategory::$category,)+
                }
            }

            /// Look up an action by numeric code.
            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(AuditAction::$variant),)+
                    _ => None,
                }
            }

            /// Look up an action by name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(AuditAction::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

audit_actions! {
    GuildUpdate = 1 => "guild_update", Guild;
    ChannelCreate = 10 => "channel_create", Channel;
    ChannelUpdate = 11 => "channel_update", Channel;
    ChannelDelete = 12 => "channel_delete", Channel;
    OverwriteCreate = 13 => "overwrite_create", Channel;
    OverwriteUpdate = 14 => "overwrite_update", Channel;
    OverwriteDelete = 15 => "overwrite_delete", Channel;
    Kick = 20 => "kick", Member;
    MemberPrune = 21 => "member_prune", Untargeted;
    Ban = 22 => "ban", Member;
    Unban = 23 => "unban", Member;
    MemberUpdate = 24 => "member_update", Member;
    MemberRoleUpdate = 25 => "member_role_update", Member;
    MemberMove = 26 => "member_move", Untargeted;
    MemberDisconnect = 27 => "member_disconnect", Untargeted;
    BotAdd = 28 => "bot_add", Member;
    RoleCreate = 30 => "role_create", Role;
    RoleUpdate = 31 => "role_update", Role;
    RoleDelete = 32 => "role_delete", Role;
    InviteCreate = 40 => "invite_create", Invite;
    InviteUpdate = 41 => "invite_update", Invite;
    InviteDelete = 42 => "invite_delete", Invite;
    WebhookCreate = 50 => "webhook_create", Object;
    WebhookUpdate = 51 => "webhook_update", Object;
    WebhookDelete = 52 => "webhook_delete", Object;
    EmojiCreate = 60 => "emoji_create", Object;
    EmojiUpdate = 61 => "emoji_update", Object;
    EmojiDelete = 62 => "emoji_delete", Object;
    MessageDelete = 72 => "message_delete", User;
    MessageBulkDelete = 73 => "message_bulk_delete", Channel;
    MessagePin = 74 => "message_pin", User;
    MessageUnpin = 75 => "message_unpin", User;
    IntegrationCreate = 80 => "integration_create", Object;
    IntegrationUpdate = 81 => "integration_update", Object;
    IntegrationDelete = 82 => "integration_delete", Object;
    StageInstanceCreate = 83 => "stage_instance_create", Object;
    StageInstanceUpdate = 84 => "stage_instance_update", Object;
    StageInstanceDelete = 85 => "stage_instance_delete", Object;
    StickerCreate = 90 => "sticker_create", Object;
    StickerUpdate = 91 => "sticker_update", Object;
    StickerDelete = 92 => "sticker_delete", Object;
    ScheduledEventCreate = 100 => "scheduled_event_create", Object;
    ScheduledEventUpdate = 101 => "scheduled_event_update", Object;
    ScheduledEventDelete = 102 => "scheduled_event_delete", Object;
    ThreadCreate = 110 => "thread_create", Thread;
    ThreadUpdate = 111 => "thread_update", Thread;
    ThreadDelete = 112 => "thread_delete", Thread;
    AppCommandPermissionUpdate = 121 => "app_command_permission_update", Object;
    AutomodRuleCreate = 140 => "automod_rule_create", Object;
    AutomodRuleUpdate = 141 => "automod_rule_update", Object;
    AutomodRuleDelete = 142 => "automod_rule_delete", Object;
    AutomodBlockMessage = 143 => "automod_block_message", Member;
    AutomodFlagMessage = 144 => "automod_flag_message", Member;
    AutomodTimeoutMember = 145 => "automod_timeout_member", Member;
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuditAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            InvalidInputError::AuditAction {
                value: s.to_string(),
            }
            .into()
        })
    }
}

impl Serialize for AuditAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for AuditAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AuditActionVisitor)
    }
}

struct AuditActionVisitor;

impl Visitor<'_> for AuditActionVisitor {
    type Value = AuditAction;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an audit action name or numeric action type")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<AuditAction, E> {
        u16::try_from(v)
            .ok()
            .and_then(AuditAction::from_code)
            .ok_or_else(|| E::custom(format!("unknown audit action type {}", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<AuditAction, E> {
        u64::try_from(v)
            .map_err(|_| E::custom("audit action type must not be negative"))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<AuditAction, E> {
        AuditAction::from_name(v).ok_or_else(|| E::custom(format!("unknown audit action '{}'", v)))
    }
}
