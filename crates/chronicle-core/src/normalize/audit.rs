use serde_json::Value;

use crate::error::NormalizeError;
use crate::raw::RawAuditEntry;
use crate::record::{AUDIT_TYPE, AuditRecord, Diff};

use super::{describe_target, user_ref};

/// Normalize one audit log entry.
///
/// # Errors
///
/// Fails only when the entry's target nests invites too deeply.
pub fn audit_entry(raw: &RawAuditEntry) -> Result<AuditRecord, NormalizeError> {
    let mut before = Diff::new();
    let mut after = Diff::new();
    for change in &raw.changes {
        before.insert(change.key.clone(), diff_value(change.old_value.as_ref()));
        after.insert(change.key.clone(), diff_value(change.new_value.as_ref()));
    }

    let extra = raw
        .options
        .as_ref()
        .filter(|options| !options.is_empty())
        .map(|options| Value::Object(options.clone()).to_string());

    Ok(AuditRecord {
        created_at: raw.created_at().render(),
        id: raw.id.to_string(),
        action: raw.action.name().to_string(),
        user: raw.user.as_ref().map(user_ref),
        target: describe_target(raw.target.as_ref())?,
        kind: AUDIT_TYPE.to_string(),
        before,
        after,
        reason: raw.reason.clone().filter(|reason| !reason.is_empty()),
        extra,
    })
}

/// Stringify one side of a change.
///
/// Strings are kept verbatim, a missing or null value becomes `"None"`, and
/// anything else becomes its compact JSON text.
pub fn diff_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
