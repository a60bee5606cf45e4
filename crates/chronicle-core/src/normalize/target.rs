use crate::error::NormalizeError;
use crate::raw::{RawInvite, RawTarget};
use crate::record::{InviteTarget, NamedRef, ObjectTarget, RoleTarget, TargetDescription};

use super::{display_name, named_ref};

/// Nesting level at which invite targets are rejected.
///
/// The entry's own target sits at level 0, an invite's inviter and channel
/// at level 1.
pub const MAX_TARGET_DEPTH: usize = 2;

/// Describe an audit entry target.
///
/// Never fails for a top-level target: unclassified values and a missing
/// target become `Unknown`.
pub fn describe_target(target: Option<&RawTarget>) -> Result<TargetDescription, NormalizeError> {
    describe_at(target, 0)
}

fn describe_at(target: Option<&RawTarget>, depth: usize) -> Result<TargetDescription, NormalizeError> {
    let Some(target) = target else {
        return Ok(TargetDescription::unknown("None", "none"));
    };

    let description = match target {
        RawTarget::User(user) => TargetDescription::User(NamedRef {
            id: user.id.to_string(),
            name: display_name(user),
        }),
        RawTarget::Member(member) => TargetDescription::Member(NamedRef {
            id: member.user.id.to_string(),
            name: display_name(&member.user),
        }),
        RawTarget::Channel(channel) => TargetDescription::Channel(named_ref(channel)),
        RawTarget::Guild(guild) => TargetDescription::Guild(named_ref(guild)),
        RawTarget::Object { id } => TargetDescription::Object(ObjectTarget {
            id: id.to_string(),
            created_at: id.created_at().render(),
        }),
        RawTarget::Role(role) => TargetDescription::Role(RoleTarget {
            id: role.id.to_string(),
            created_at: role.id.created_at().render(),
            name: role.name.clone(),
        }),
        RawTarget::Invite(invite) => describe_invite(invite, depth)?,
        RawTarget::Other { type_name, repr } => TargetDescription::unknown(repr, type_name),
    };

    Ok(description)
}

fn describe_invite(invite: &RawInvite, depth: usize) -> Result<TargetDescription, NormalizeError> {
    if depth >= MAX_TARGET_DEPTH {
        return Err(NormalizeError::TargetTooDeep {
            max: MAX_TARGET_DEPTH,
        });
    }

    let nested = |target: Option<&RawTarget>| -> Result<_, NormalizeError> {
        target
            .map(|target| describe_at(Some(target), depth + 1).map(Box::new))
            .transpose()
    };

    Ok(TargetDescription::Invite(InviteTarget {
        id: invite.code.clone(),
        created_at: invite
            .created_at
            .map(|created| created.render())
            .unwrap_or_else(|| "None".to_string()),
        max_age: invite.max_age,
        temporary: invite.temporary,
        uses: invite.uses,
        max_uses: invite.max_uses,
        inviter: nested(invite.inviter.as_deref())?,
        channel: nested(invite.channel.as_deref())?,
        url: invite.url(),
    }))
}
