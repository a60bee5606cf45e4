use crate::raw::{RawAttachment, RawEmbed, RawMessage, RawReaction};
use crate::record::{AttachmentRecord, EmbedRecord, MessageRecord, ReactionRecord};

use super::{named_ref, system_content, user_ref};

/// Placeholder for absent embed values.
const ABSENT: &str = "None";

/// Normalize one message.
///
/// Optional fields are only set when the message carries the data: no
/// attachments means no `attachments` key, an unedited message has no
/// `edited_at`, and `pinned` is only ever written as `true`.
pub fn message(raw: &RawMessage) -> MessageRecord {
    let attachments = attachments(&raw.attachments);
    let embeds = embeds(&raw.embeds);
    let reactions = reactions(&raw.reactions);

    MessageRecord {
        created_at: raw.created_at().render(),
        id: raw.id.to_string(),
        author: user_ref(&raw.author),
        channel: named_ref(&raw.channel),
        content: system_content(raw),
        kind: raw.kind.name(),
        attachments: (!attachments.is_empty()).then_some(attachments),
        embeds: (!embeds.is_empty()).then_some(embeds),
        reactions: (!reactions.is_empty()).then_some(reactions),
        edited_at: raw.edited_at.map(|edited| edited.render()),
        pinned: raw.pinned.then_some(true),
    }
}

/// Attachments with zero dimensions lose their `height`/`width` keys.
pub fn attachments(raw: &[RawAttachment]) -> Vec<AttachmentRecord> {
    raw.iter()
        .map(|attachment| AttachmentRecord {
            id: attachment.id.to_string(),
            filename: attachment.filename.clone(),
            size: attachment.size,
            url: attachment.url.clone(),
            height: attachment.height.filter(|&h| h != 0),
            width: attachment.width.filter(|&w| w != 0),
        })
        .collect()
}

/// Empty embeds are dropped; the rest keep title, description and url.
pub fn embeds(raw: &[RawEmbed]) -> Vec<EmbedRecord> {
    raw.iter()
        .filter(|embed| !embed.is_empty())
        .map(|embed| EmbedRecord {
            title: or_absent(embed.title.as_deref()),
            description: or_absent(embed.description.as_deref()),
            url: or_absent(embed.url.as_deref()),
        })
        .collect()
}

pub fn reactions(raw: &[RawReaction]) -> Vec<ReactionRecord> {
    raw.iter()
        .map(|reaction| ReactionRecord {
            emoji: reaction.emoji.render(),
            count: reaction.count,
        })
        .collect()
}

fn or_absent(value: Option<&str>) -> String {
    value.unwrap_or(ABSENT).to_string()
}
