//! Snapshot session implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use chronicle_core::raw::{RawAuditEntry, RawMessage};
use chronicle_core::traits::{Channel, Community, Order, Pages, Session};
use chronicle_core::types::{AuditAction, Snowflake};
use chronicle_core::Result;

use crate::store::SnapshotStore;

/// Session over a snapshot directory.
///
/// Files are read when their stream is first polled. Snapshot files carry no
/// ordering guarantee, so every stream declares [`Order::Unordered`].
#[derive(Debug, Clone)]
pub struct FileSession {
    store: SnapshotStore,
}

impl FileSession {
    pub(crate) fn new(store: SnapshotStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Session for FileSession {
    #[instrument(skip(self))]
    async fn resolve_community(&self, id: Snowflake) -> Result<Option<Community>> {
        let guild = self.store.guild()?.filter(|guild| guild.id == id);
        Ok(guild.map(|guild| Community {
            id: guild.id,
            name: guild.name,
        }))
    }

    #[instrument(skip(self, community), fields(guild = %community.id))]
    async fn channels(&self, community: &Community) -> Result<Vec<Channel>> {
        let channels = self
            .store
            .guild()?
            .filter(|guild| guild.id == community.id)
            .map(|guild| guild.channels)
            .unwrap_or_default();
        debug!(count = channels.len(), "Listed channels");
        Ok(channels)
    }

    fn history(&self, channel: &Channel, _order: Order) -> Pages<'_, RawMessage> {
        let id = channel.id;
        let stream = async_stream::stream! {
            match self.store.messages(id) {
                Ok(messages) => {
                    debug!(channel = %id, count = messages.len(), "Read snapshot history");
                    for message in messages {
                        yield Ok(message);
                    }
                }
                Err(e) => yield Err(e),
            }
        };
        Pages::new(Order::Unordered, stream)
    }

    fn audit_log(&self, _community: &Community, action: AuditAction) -> Pages<'_, RawAuditEntry> {
        let stream = async_stream::stream! {
            match self.store.audit_entries(action) {
                Ok(entries) => {
                    debug!(%action, count = entries.len(), "Read snapshot audit log");
                    for entry in entries {
                        yield Ok(entry);
                    }
                }
                Err(e) => yield Err(e),
            }
        };
        Pages::new(Order::Unordered, stream)
    }

    async fn disconnect(&self) -> Result<()> {
        debug!("Closed snapshot");
        Ok(())
    }
}
