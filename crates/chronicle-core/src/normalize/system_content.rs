use crate::raw::{MessageKind, RawMessage};

/// Join messages, picked by creation time so the choice is stable.
const WELCOME_FORMATS: [&str; 13] = [
    "{} joined the party.",
    "{} is here.",
    "Welcome, {}. We hope you brought pizza.",
    "A wild {} appeared.",
    "{} just landed.",
    "{} just slid into the server.",
    "{} just showed up!",
    "Welcome {}. Say hi!",
    "{} hopped into the server.",
    "Everyone welcome {}!",
    "Glad you're here, {}.",
    "Good to see you, {}.",
    "Yay you made it, {}!",
];

/// The content a client would display for a message.
///
/// Ordinary messages show their literal content. System messages get a
/// sentence built from the author, mentions and content.
pub fn system_content(message: &RawMessage) -> String {
    let author = &message.author.name;
    let content = &message.content;
    let mentioned = message.mentions.first().map(|user| user.name.as_str());
    let guild = message
        .guild
        .as_ref()
        .map(|guild| guild.name.as_str())
        .unwrap_or("The server");

    match message.kind {
        MessageKind::RECIPIENT_ADD => match mentioned {
            Some(target) => format!("{} added {} to the thread.", author, target),
            None => content.clone(),
        },
        MessageKind::RECIPIENT_REMOVE => match mentioned {
            Some(target) => format!("{} removed {} from the thread.", author, target),
            None => content.clone(),
        },
        MessageKind::CHANNEL_NAME_CHANGE => {
            format!("{} changed the channel name: **{}**", author, content)
        }
        MessageKind::CHANNEL_ICON_CHANGE => format!("{} changed the channel icon.", author),
        MessageKind::PINS_ADD => format!("{} pinned a message to this channel.", author),
        MessageKind::NEW_MEMBER => welcome(author, message.created_at().unix_millis()),
        MessageKind::PREMIUM_GUILD_SUBSCRIPTION => {
            if content.is_empty() {
                format!("{} just boosted the server!", author)
            } else {
                format!("{} just boosted the server **{}** times!", author, content)
            }
        }
        MessageKind::PREMIUM_GUILD_TIER_1 => tier_up(author, guild, 1),
        MessageKind::PREMIUM_GUILD_TIER_2 => tier_up(author, guild, 2),
        MessageKind::PREMIUM_GUILD_TIER_3 => tier_up(author, guild, 3),
        MessageKind::CHANNEL_FOLLOW_ADD => format!(
            "{} has added {} to this channel. Its most important updates will show up here.",
            author, content
        ),
        MessageKind::THREAD_CREATED => format!(
            "{} started a thread: **{}**. See all **threads**.",
            author, content
        ),
        _ => content.clone(),
    }
}

fn welcome(author: &str, created_at_ms: i64) -> String {
    let index = created_at_ms.rem_euclid(WELCOME_FORMATS.len() as i64) as usize;
    WELCOME_FORMATS[index].replacen("{}", author, 1)
}

fn tier_up(author: &str, guild: &str, level: u8) -> String {
    format!(
        "{} just boosted the server! {} has achieved **Level {}!**",
        author, guild, level
    )
}
