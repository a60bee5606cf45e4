//! Archived description of an audit log target.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::NamedRef;

/// `{id, created_at}` for something only known by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTarget {
    pub id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTarget {
    pub id: String,
    pub created_at: String,
    pub name: String,
}

/// Invite fields; unknown numeric values are `null`, an unknown creation time
/// is the string `"None"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteTarget {
    pub id: String,
    pub created_at: String,
    pub max_age: Option<u32>,
    pub temporary: Option<bool>,
    pub uses: Option<u32>,
    pub max_uses: Option<u32>,
    pub inviter: Option<Box<TargetDescription>>,
    pub channel: Option<Box<TargetDescription>>,
    pub url: String,
}

/// Printed form and type name of a target nothing else matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownTarget {
    #[serde(rename = "str")]
    pub repr: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// What an audit action was performed on, keyed by a `type` discriminator.
///
/// Serialized as the variant's fields followed by `"type": "<Variant>"`,
/// except `Unknown`, whose `type` holds the unrecognized type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetDescription {
    User(NamedRef),
    Member(NamedRef),
    Channel(NamedRef),
    Guild(NamedRef),
    Object(ObjectTarget),
    Role(RoleTarget),
    Invite(InviteTarget),
    Unknown(UnknownTarget),
}

impl TargetDescription {
    /// The discriminator written to the `type` field.
    pub fn type_name(&self) -> &str {
        match self {
            TargetDescription::User(_) => "User",
            TargetDescription::Member(_) => "Member",
            TargetDescription::Channel(_) => "Channel",
            TargetDescription::Guild(_) => "Guild",
            TargetDescription::Object(_) => "Object",
            TargetDescription::Role(_) => "Role",
            TargetDescription::Invite(_) => "Invite",
            TargetDescription::Unknown(unknown) => &unknown.type_name,
        }
    }

    /// Fallback description.
    pub fn unknown(repr: impl Into<String>, type_name: impl Into<String>) -> Self {
        TargetDescription::Unknown(UnknownTarget {
            repr: repr.into(),
            type_name: type_name.into(),
        })
    }
}

/// Serializes `inner`'s fields followed by the `type` tag.
#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(flatten)]
    inner: &'a T,
    #[serde(rename = "type")]
    kind: &'a str,
}

impl Serialize for TargetDescription {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let kind = self.type_name();
        match self {
            TargetDescription::User(inner)
            | TargetDescription::Member(inner)
            | TargetDescription::Channel(inner)
            | TargetDescription::Guild(inner) => Tagged { inner, kind }.serialize(serializer),
            TargetDescription::Object(inner) => Tagged { inner, kind }.serialize(serializer),
            TargetDescription::Role(inner) => Tagged { inner, kind }.serialize(serializer),
            TargetDescription::Invite(inner) => Tagged { inner, kind }.serialize(serializer),
            TargetDescription::Unknown(unknown) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("str", &unknown.repr)?;
                map.serialize_entry("type", &unknown.type_name)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TargetDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        // Only unknown targets carry `str`; their `type` may shadow a known kind.
        if value.get("str").is_some() {
            return serde_json::from_value(value)
                .map(TargetDescription::Unknown)
                .map_err(D::Error::custom);
        }

        let kind = value
            .get("type")
            .and_then(|kind| kind.as_str())
            .ok_or_else(|| D::Error::missing_field("type"))?
            .to_string();

        let description = match kind.as_str() {
            "User" => serde_json::from_value(value).map(TargetDescription::User),
            "Member" => serde_json::from_value(value).map(TargetDescription::Member),
            "Channel" => serde_json::from_value(value).map(TargetDescription::Channel),
            "Guild" => serde_json::from_value(value).map(TargetDescription::Guild),
            "Object" => serde_json::from_value(value).map(TargetDescription::Object),
            "Role" => serde_json::from_value(value).map(TargetDescription::Role),
            "Invite" => serde_json::from_value(value).map(TargetDescription::Invite),
            _ => serde_json::from_value(value).map(TargetDescription::Unknown),
        };

        description.map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn named_targets_carry_type_last() {
        let target = TargetDescription::Channel(NamedRef {
            id: "2".into(),
            name: "general".into(),
        });
        assert_eq!(
            serde_json::to_string(&target).unwrap(),
            r#"{"id":"2","name":"general","type":"Channel"}"#
        );
    }

    #[test]
    fn unknown_uses_its_own_type_name() {
        let target = TargetDescription::unknown("<StageInstance id=1>", "StageInstance");
        assert_eq!(
            serde_json::to_value(&target).unwrap(),
            json!({"str": "<StageInstance id=1>", "type": "StageInstance"})
        );
        let back: TargetDescription =
            serde_json::from_value(serde_json::to_value(&target).unwrap()).unwrap();
        assert_eq!(back, target);
    }

    #[test]
    fn unknown_named_like_a_known_kind_round_trips() {
        let target = TargetDescription::unknown("<Role-ish opaque>", "Role");
        let text = serde_json::to_string(&target).unwrap();
        assert_eq!(text, r#"{"str":"<Role-ish opaque>","type":"Role"}"#);
        let back: TargetDescription = serde_json::from_str(&text).unwrap();
        assert_eq!(back, target);
    }

    #[test]
    fn invite_round_trips_with_nested_targets() {
        let target = TargetDescription::Invite(InviteTarget {
            id: "abc".into(),
            created_at: "None".into(),
            max_age: Some(86400),
            temporary: Some(false),
            uses: Some(0),
            max_uses: None,
            inviter: Some(Box::new(TargetDescription::User(NamedRef {
                id: "1".into(),
                name: "alice#0".into(),
            }))),
            channel: None,
            url: "https://discord.gg/abc".into(),
        });
        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value["type"], "Invite");
        assert_eq!(value["inviter"]["type"], "User");
        assert_eq!(value["channel"], serde_json::Value::Null);
        let back: TargetDescription = serde_json::from_value(value).unwrap();
        assert_eq!(back, target);
    }
}
