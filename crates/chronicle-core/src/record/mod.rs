//! Normalized archive records.
//!
//! Every type here holds only strings, integers, booleans, lists and maps, so
//! a record always has a JSON form. Field order matches the archive layout.

mod target;

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

pub use target::{InviteTarget, ObjectTarget, RoleTarget, TargetDescription, UnknownTarget};

/// Attribute name to stringified value.
pub type Diff = BTreeMap<String, String>;

/// Anything that can be placed in an archive file.
pub trait Archivable: Serialize + Debug {
    /// Rendered creation timestamp; the sort key of every archive file.
    fn created_at(&self) -> &str;

    /// String-encoded identifier, used in diagnostics.
    fn id(&self) -> &str;
}

/// Sort records ascending by creation time.
///
/// The sort is stable: records with equal timestamps keep their input order.
pub fn sort_chronologically<T: Archivable>(records: &mut [T]) {
    records.sort_by(|a, b| a.created_at().cmp(b.created_at()));
}

/// `{id, name}` for a user, with `name` as `<name>#<discriminator>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

/// `{id, name}` for a channel or guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub id: String,
    pub filename: String,
    pub size: u64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Archived embed; absent values hold the literal string `"None"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedRecord {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub emoji: String,
    pub count: u32,
}

/// One archived message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub created_at: String,
    pub id: String,
    pub author: UserRef,
    pub channel: NamedRef,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<EmbedRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<ReactionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// The `type` tag carried by every audit record.
pub const AUDIT_TYPE: &str = "audit";

/// One archived audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub created_at: String,
    pub id: String,
    pub action: String,
    pub user: Option<UserRef>,
    pub target: TargetDescription,
    #[serde(rename = "type")]
    pub kind: String,
    pub before: Diff,
    pub after: Diff,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

/// Either kind of record, as read back from an archive file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Message(MessageRecord),
    Audit(AuditRecord),
}

impl Archivable for MessageRecord {
    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Archivable for AuditRecord {
    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl Archivable for Record {
    fn created_at(&self) -> &str {
        match self {
            Record::Message(message) => &message.created_at,
            Record::Audit(entry) => &entry.created_at,
        }
    }

    fn id(&self) -> &str {
        match self {
            Record::Message(message) => &message.id,
            Record::Audit(entry) => &entry.id,
        }
    }
}

impl From<MessageRecord> for Record {
    fn from(record: MessageRecord) -> Self {
        Record::Message(record)
    }
}

impl From<AuditRecord> for Record {
    fn from(record: AuditRecord) -> Self {
        Record::Audit(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(id: &str, created_at: &str) -> MessageRecord {
        MessageRecord {
            created_at: created_at.to_string(),
            id: id.to_string(),
            author: UserRef {
                id: "1".into(),
                name: "alice#0".into(),
            },
            channel: NamedRef {
                id: "2".into(),
                name: "general".into(),
            },
            content: "hi".into(),
            kind: "default".into(),
            attachments: None,
            embeds: None,
            reactions: None,
            edited_at: None,
            pinned: None,
        }
    }

    #[test]
    fn optional_fields_are_omitted() {
        let value = serde_json::to_value(message("5", "2021-01-01 00:00:00.000000+00:00")).unwrap();
        assert_eq!(
            value,
            json!({
                "created_at": "2021-01-01 00:00:00.000000+00:00",
                "id": "5",
                "author": {"id": "1", "name": "alice#0"},
                "channel": {"id": "2", "name": "general"},
                "content": "hi",
                "type": "default",
            })
        );
    }

    #[test]
    fn stable_chronological_sort() {
        let mut records = vec![
            message("b", "2021-01-02 00:00:00.000000+00:00"),
            message("a1", "2021-01-01 00:00:00.000000+00:00"),
            message("a2", "2021-01-01 00:00:00.000000+00:00"),
        ];
        sort_chronologically(&mut records);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "b"]);
    }

    #[test]
    fn untagged_record_reads_both_kinds() {
        let records: Vec<Record> = serde_json::from_value(json!([
            {
                "created_at": "2021-01-01 00:00:00.000000+00:00",
                "id": "5",
                "author": {"id": "1", "name": "alice#0"},
                "channel": {"id": "2", "name": "general"},
                "content": "hi",
                "type": "default",
                "pinned": true,
            },
            {
                "created_at": "2021-01-02 00:00:00.000000+00:00",
                "id": "6",
                "action": "ban",
                "user": {"id": "1", "name": "alice#0"},
                "target": {"id": "3", "name": "mallory#0", "type": "Member"},
                "type": "audit",
                "before": {},
                "after": {},
            }
        ]))
        .unwrap();
        assert!(matches!(&records[0], Record::Message(m) if m.pinned == Some(true)));
        assert!(matches!(&records[1], Record::Audit(a) if a.action == "ban"));
    }
}
