//! Conversion of raw remote items into archive records.
//!
//! Everything here is pure: no I/O, no clock, no randomness. The only
//! fallible path is audit target description, which refuses invite chains
//! nested past [`MAX_TARGET_DEPTH`].

mod audit;
mod message;
mod system_content;
mod target;

use crate::raw::{RawRef, RawUser};
use crate::record::{NamedRef, UserRef};

pub use audit::{audit_entry, diff_value};
pub use message::{attachments, embeds, message, reactions};
pub use system_content::system_content;
pub use target::{MAX_TARGET_DEPTH, describe_target};

/// `<name>#<discriminator>`.
pub(crate) fn display_name(user: &RawUser) -> String {
    format!("{}#{}", user.name, user.discriminator)
}

/// Encode a user as `{id, name}`.
pub fn user_ref(user: &RawUser) -> UserRef {
    UserRef {
        id: user.id.to_string(),
        name: display_name(user),
    }
}

/// Encode a channel or guild as `{id, name}`.
pub fn named_ref(item: &RawRef) -> NamedRef {
    NamedRef {
        id: item.id.to_string(),
        name: item.name.clone(),
    }
}
