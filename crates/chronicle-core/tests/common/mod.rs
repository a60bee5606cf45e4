//! In-memory remote for pipeline tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures_util::stream;

use chronicle_core::error::{Error, FetchError};
use chronicle_core::raw::{MessageKind, RawAuditEntry, RawMessage, RawRef, RawUser};
use chronicle_core::{
    AuditAction, Channel, Community, Credential, Order, Pages, Remote, Result, Session, Snowflake,
};

pub const GUILD_ID: u64 = 81384788765712384;

/// 2021-01-01 00:00:00 UTC.
pub const T1: u64 = 1_609_459_200_000;
pub const T2: u64 = T1 + 60_000;
pub const T3: u64 = T2 + 60_000;
pub const T4: u64 = T3 + 60_000;
pub const T5: u64 = T4 + 60_000;

pub fn rendered(unix_ms: u64) -> String {
    Snowflake::from_unix_millis(unix_ms, 0).created_at().render()
}

pub fn user(id: u64, name: &str) -> RawUser {
    RawUser {
        id: Snowflake::new(id),
        name: name.into(),
        discriminator: "0".into(),
        bot: false,
    }
}

pub fn channel(id: u64, name: &str, category: Option<&str>) -> Channel {
    Channel {
        id: Snowflake::new(id),
        name: name.into(),
        category: category.map(String::from),
        position: 0,
    }
}

pub fn message(channel: &Channel, unix_ms: u64, content: &str) -> RawMessage {
    RawMessage {
        id: Snowflake::from_unix_millis(unix_ms, channel.id.get() & 0xff),
        channel: RawRef {
            id: channel.id,
            name: channel.name.clone(),
        },
        guild: None,
        author: user(1, "alice"),
        content: content.into(),
        kind: MessageKind::DEFAULT,
        edited_at: None,
        pinned: false,
        attachments: Vec::new(),
        embeds: Vec::new(),
        reactions: Vec::new(),
        mentions: Vec::new(),
    }
}

pub fn entry(action: AuditAction, unix_ms: u64) -> RawAuditEntry {
    RawAuditEntry {
        id: Snowflake::from_unix_millis(unix_ms, 0),
        action,
        user: Some(user(1, "alice")),
        target: None,
        changes: Vec::new(),
        reason: None,
        options: None,
    }
}

/// Hand-built guild contents.
#[derive(Default)]
pub struct Fixture {
    pub community: Option<Community>,
    pub channels: Vec<Channel>,
    pub messages: BTreeMap<Snowflake, Vec<RawMessage>>,
    pub entries: BTreeMap<AuditAction, Vec<RawAuditEntry>>,
    pub audit_order: Option<Order>,
    /// Channels whose history fails after the first item.
    pub broken_channels: BTreeSet<Snowflake>,
    pub fail_disconnect: bool,
}

impl Fixture {
    pub fn guild() -> Self {
        Self {
            community: Some(Community {
                id: Snowflake::new(GUILD_ID),
                name: "Rustaceans".into(),
            }),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, channel: Channel, messages: Vec<RawMessage>) -> Self {
        self.messages.insert(channel.id, messages);
        self.channels.push(channel);
        self
    }

    pub fn with_entries(mut self, action: AuditAction, entries: Vec<RawAuditEntry>) -> Self {
        self.entries.insert(action, entries);
        self
    }
}

#[derive(Default)]
pub struct Counters {
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub history_calls: AtomicUsize,
}

#[derive(Clone)]
pub struct MemoryRemote {
    fixture: Arc<Fixture>,
    pub counters: Arc<Counters>,
}

impl MemoryRemote {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn disconnects(&self) -> usize {
        self.counters.disconnects.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.counters.history_calls.load(Ordering::SeqCst)
    }
}

pub struct MemorySession {
    fixture: Arc<Fixture>,
    counters: Arc<Counters>,
}

#[async_trait]
impl Remote for MemoryRemote {
    type Session = MemorySession;

    async fn connect(&self, credential: &Credential) -> Result<MemorySession> {
        if credential.as_str() == "bad" {
            return Err(Error::connection("401 Unauthorized"));
        }
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            fixture: Arc::clone(&self.fixture),
            counters: Arc::clone(&self.counters),
        })
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn resolve_community(&self, id: Snowflake) -> Result<Option<Community>> {
        Ok(self.fixture.community.clone().filter(|c| c.id == id))
    }

    async fn channels(&self, _community: &Community) -> Result<Vec<Channel>> {
        Ok(self.fixture.channels.clone())
    }

    fn history(&self, channel: &Channel, _order: Order) -> Pages<'_, RawMessage> {
        self.counters.history_calls.fetch_add(1, Ordering::SeqCst);
        let messages = self.fixture.messages.get(&channel.id).cloned().unwrap_or_default();
        if self.fixture.broken_channels.contains(&channel.id) {
            let mut items: Vec<Result<RawMessage>> = messages.into_iter().take(1).map(Ok).collect();
            items.push(Err(FetchError::Transport {
                message: "connection reset".into(),
            }
            .into()));
            return Pages::new(Order::Unordered, stream::iter(items));
        }
        Pages::from_items(Order::Unordered, messages)
    }

    fn audit_log(&self, _community: &Community, action: AuditAction) -> Pages<'_, RawAuditEntry> {
        let entries = self.fixture.entries.get(&action).cloned().unwrap_or_default();
        Pages::from_items(self.fixture.audit_order.unwrap_or(Order::Unordered), entries)
    }

    async fn disconnect(&self) -> Result<()> {
        self.counters.disconnects.fetch_add(1, Ordering::SeqCst);
        if self.fixture.fail_disconnect {
            return Err(Error::connection("close failed"));
        }
        Ok(())
    }
}
