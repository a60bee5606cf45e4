//! Translation of API payloads into the raw model.

use std::collections::HashMap;

use serde_json::Value;

use chronicle_core::Snowflake;
use chronicle_core::raw::{
    MessageKind, RawAttachment, RawAuditEntry, RawChange, RawInvite, RawMember, RawMessage,
    RawReaction, RawRef, RawRole, RawTarget, RawUser,
};
use chronicle_core::types::{AuditAction, TargetCategory};

use crate::endpoints::{ApiAuditEntry, ApiAuditLog, ApiChannel, ApiMessage, ApiRole, ApiUser};

pub fn user(api: &ApiUser) -> RawUser {
    RawUser {
        id: api.id,
        name: api.username.clone(),
        discriminator: api.discriminator.clone().unwrap_or_else(|| "0".to_string()),
        bot: api.bot,
    }
}

pub fn message(api: ApiMessage, channel: RawRef, guild: Option<RawRef>) -> RawMessage {
    RawMessage {
        id: api.id,
        channel,
        guild,
        author: user(&api.author),
        content: api.content,
        kind: MessageKind(api.kind),
        edited_at: api.edited_timestamp,
        pinned: api.pinned,
        attachments: api
            .attachments
            .into_iter()
            .map(|a| RawAttachment {
                id: a.id,
                filename: a.filename,
                size: a.size,
                url: a.url,
                height: a.height,
                width: a.width,
            })
            .collect(),
        embeds: api.embeds,
        reactions: api
            .reactions
            .into_iter()
            .map(|r| RawReaction {
                emoji: r.emoji,
                count: r.count,
            })
            .collect(),
        mentions: api.mentions.iter().map(user).collect(),
    }
}

/// Guild-wide lookups that outlive a single audit log page.
#[derive(Debug, Default, Clone)]
pub struct GuildCache {
    pub guild: Option<RawRef>,
    pub roles: HashMap<Snowflake, RawRole>,
    pub channels: HashMap<Snowflake, RawRef>,
}

impl GuildCache {
    pub fn add_roles(&mut self, roles: &[ApiRole]) {
        for role in roles {
            self.roles.insert(
                role.id,
                RawRole {
                    id: role.id,
                    name: role.name.clone(),
                },
            );
        }
    }

    pub fn add_channel(&mut self, channel: &ApiChannel) {
        self.channels.insert(
            channel.id,
            RawRef {
                id: channel.id,
                name: channel.name.clone().unwrap_or_default(),
            },
        );
    }
}

/// Resolves audit entry targets against one page and the guild cache.
pub struct TargetResolver<'a> {
    cache: &'a GuildCache,
    users: HashMap<Snowflake, RawUser>,
    threads: HashMap<Snowflake, String>,
    named_objects: HashMap<Snowflake, String>,
}

impl<'a> TargetResolver<'a> {
    pub fn new(page: &ApiAuditLog, cache: &'a GuildCache) -> Self {
        let users = page.users.iter().map(|u| (u.id, user(u))).collect();
        let threads = page
            .threads
            .iter()
            .map(|t| (t.id, t.name.clone().unwrap_or_default()))
            .collect();
        let named_objects = page
            .webhooks
            .iter()
            .chain(page.integrations.iter())
            .filter_map(|o| o.name.clone().map(|name| (o.id, name)))
            .collect();

        Self {
            cache,
            users,
            threads,
            named_objects,
        }
    }

    /// Convert one entry. Entries with an unknown action type yield `None`.
    pub fn entry(&self, api: &ApiAuditEntry) -> Option<RawAuditEntry> {
        let action = AuditAction::from_code(api.action_type)?;
        Some(RawAuditEntry {
            id: api.id,
            action,
            user: api.user_id.and_then(|id| self.users.get(&id).cloned()),
            target: self.target(action, api),
            changes: api
                .changes
                .iter()
                .map(|c| RawChange {
                    key: c.key.clone(),
                    old_value: c.old_value.clone(),
                    new_value: c.new_value.clone(),
                })
                .collect(),
            reason: api.reason.clone(),
            options: api.options.clone(),
        })
    }

    fn target(&self, action: AuditAction, api: &ApiAuditEntry) -> Option<RawTarget> {
        let category = action.target_category();
        if category == TargetCategory::Invite {
            return Some(self.invite(api));
        }

        let id = api.target_id?;
        let object = RawTarget::Object { id };

        let target = match category {
            TargetCategory::Guild => self
                .cache
                .guild
                .clone()
                .filter(|guild| guild.id == id)
                .map(RawTarget::Guild),
            TargetCategory::Channel => self.cache.channels.get(&id).cloned().map(RawTarget::Channel),
            TargetCategory::Member => self.users.get(&id).cloned().map(|user| {
                RawTarget::Member(RawMember { user, nick: None })
            }),
            TargetCategory::User => self.users.get(&id).cloned().map(RawTarget::User),
            TargetCategory::Role => self
                .cache
                .roles
                .get(&id)
                .cloned()
                .or_else(|| {
                    changed_str(api, "name").map(|name| RawRole { id, name })
                })
                .map(RawTarget::Role),
            TargetCategory::Thread => self
                .threads
                .get(&id)
                .map(|name| RawTarget::other("Thread", format!("<Thread id={} name={}>", id, name))),
            TargetCategory::Object => self.named_objects.get(&id).map(|name| {
                if matches!(
                    action,
                    AuditAction::WebhookCreate | AuditAction::WebhookUpdate | AuditAction::WebhookDelete
                ) {
                    RawTarget::other("Webhook", format!("<Webhook id={} name={}>", id, name))
                } else {
                    RawTarget::other("Integration", format!("<Integration id={} name={}>", id, name))
                }
            }),
            TargetCategory::Invite | TargetCategory::Untargeted => return None,
        };

        Some(target.unwrap_or(object))
    }

    /// Rebuild an invite from its change list.
    fn invite(&self, api: &ApiAuditEntry) -> RawTarget {
        let inviter = changed_id(api, "inviter_id")
            .and_then(|id| self.users.get(&id).cloned())
            .map(|u| Box::new(RawTarget::User(u)));
        let channel = changed_id(api, "channel_id").map(|id| {
            Box::new(
                self.cache
                    .channels
                    .get(&id)
                    .cloned()
                    .map(RawTarget::Channel)
                    .unwrap_or(RawTarget::Object { id }),
            )
        });

        RawTarget::Invite(RawInvite {
            code: changed_str(api, "code").unwrap_or_default(),
            created_at: None,
            max_age: changed_u32(api, "max_age"),
            temporary: changed(api, "temporary").and_then(Value::as_bool),
            uses: changed_u32(api, "uses"),
            max_uses: changed_u32(api, "max_uses"),
            inviter,
            channel,
        })
    }
}

/// The value of `key` on whichever side of the change has one.
fn changed<'e>(api: &'e ApiAuditEntry, key: &str) -> Option<&'e Value> {
    let change = api.changes.iter().find(|c| c.key == key)?;
    change
        .new_value
        .as_ref()
        .filter(|v| !v.is_null())
        .or(change.old_value.as_ref())
        .filter(|v| !v.is_null())
}

fn changed_str(api: &ApiAuditEntry, key: &str) -> Option<String> {
    changed(api, key).and_then(Value::as_str).map(String::from)
}

fn changed_u32(api: &ApiAuditEntry, key: &str) -> Option<u32> {
    changed(api, key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

fn changed_id(api: &ApiAuditEntry, key: &str) -> Option<Snowflake> {
    match changed(api, key)? {
        Value::String(s) => Snowflake::parse(s).ok(),
        Value::Number(n) => n.as_u64().map(Snowflake::new),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: Value) -> ApiAuditLog {
        serde_json::from_value(value).unwrap()
    }

    fn cache() -> GuildCache {
        let mut cache = GuildCache {
            guild: Some(RawRef {
                id: Snowflake::new(1),
                name: "Rustaceans".into(),
            }),
            ..GuildCache::default()
        };
        cache.add_roles(&[ApiRole {
            id: Snowflake::new(50),
            name: "mods".into(),
        }]);
        cache.channels.insert(
            Snowflake::new(2),
            RawRef {
                id: Snowflake::new(2),
                name: "general".into(),
            },
        );
        cache
    }

    #[test]
    fn member_target_comes_from_page_users() {
        let page = page(json!({
            "audit_log_entries": [
                {"id": "900", "action_type": 22, "user_id": "10", "target_id": "11", "reason": "spam"}
            ],
            "users": [
                {"id": "10", "username": "mod", "discriminator": "0001"},
                {"id": "11", "username": "spammer", "discriminator": "0"}
            ]
        }));
        let cache = cache();
        let resolver = TargetResolver::new(&page, &cache);
        let entry = resolver.entry(&page.audit_log_entries[0]).unwrap();

        assert_eq!(entry.action, AuditAction::Ban);
        assert_eq!(entry.user.unwrap().name, "mod");
        let Some(RawTarget::Member(member)) = entry.target else {
            panic!("expected member target");
        };
        assert_eq!(member.user.name, "spammer");
    }

    #[test]
    fn deleted_role_is_named_from_changes() {
        let page = page(json!({
            "audit_log_entries": [
                {"id": "901", "action_type": 32, "target_id": "77",
                 "changes": [{"key": "name", "old_value": "gone"}]}
            ]
        }));
        let cache = cache();
        let entry = TargetResolver::new(&page, &cache)
            .entry(&page.audit_log_entries[0])
            .unwrap();
        assert_eq!(
            entry.target,
            Some(RawTarget::Role(RawRole {
                id: Snowflake::new(77),
                name: "gone".into(),
            }))
        );
    }

    #[test]
    fn invite_is_rebuilt_from_changes() {
        let page = page(json!({
            "audit_log_entries": [
                {"id": "902", "action_type": 40, "changes": [
                    {"key": "code", "new_value": "abc"},
                    {"key": "channel_id", "new_value": "2"},
                    {"key": "inviter_id", "new_value": "10"},
                    {"key": "max_age", "new_value": 86400},
                    {"key": "temporary", "new_value": false},
                    {"key": "uses", "new_value": 0},
                    {"key": "max_uses", "new_value": 0}
                ]}
            ],
            "users": [{"id": "10", "username": "alice"}]
        }));
        let cache = cache();
        let entry = TargetResolver::new(&page, &cache)
            .entry(&page.audit_log_entries[0])
            .unwrap();
        let Some(RawTarget::Invite(invite)) = entry.target else {
            panic!("expected invite target");
        };
        assert_eq!(invite.code, "abc");
        assert_eq!(invite.max_age, Some(86400));
        assert_eq!(invite.temporary, Some(false));
        assert!(matches!(invite.inviter.as_deref(), Some(RawTarget::User(u)) if u.name == "alice"));
        assert!(matches!(invite.channel.as_deref(), Some(RawTarget::Channel(c)) if c.name == "general"));
    }

    #[test]
    fn unresolvable_targets_fall_back_to_object() {
        let page = page(json!({
            "audit_log_entries": [
                {"id": "903", "action_type": 22, "target_id": "404"},
                {"id": "904", "action_type": 26},
                {"id": "905", "action_type": 250, "target_id": "1"}
            ]
        }));
        let cache = cache();
        let resolver = TargetResolver::new(&page, &cache);

        let missing_member = resolver.entry(&page.audit_log_entries[0]).unwrap();
        assert_eq!(
            missing_member.target,
            Some(RawTarget::Object {
                id: Snowflake::new(404)
            })
        );
        let untargeted = resolver.entry(&page.audit_log_entries[1]).unwrap();
        assert_eq!(untargeted.target, None);
        assert!(resolver.entry(&page.audit_log_entries[2]).is_none());
    }

    #[test]
    fn webhooks_are_unknown_targets() {
        let page = page(json!({
            "audit_log_entries": [{"id": "906", "action_type": 50, "target_id": "60"}],
            "webhooks": [{"id": "60", "name": "deploys"}]
        }));
        let cache = cache();
        let entry = TargetResolver::new(&page, &cache)
            .entry(&page.audit_log_entries[0])
            .unwrap();
        assert_eq!(
            entry.target,
            Some(RawTarget::other("Webhook", "<Webhook id=60 name=deploys>"))
        );
    }
}
