//! Connected session trait.

use async_trait::async_trait;

use crate::raw::{RawAuditEntry, RawMessage};
use crate::types::{AuditAction, Snowflake};
use crate::Result;

use super::{Channel, Community, Order, Pages};

/// A live connection to a remote.
///
/// A session must be released with [`Session::disconnect`]; the orchestrator
/// does so on every exit path.
#[async_trait]
pub trait Session: Send + Sync {
    /// Look up a guild by id. `Ok(None)` if it does not exist or is not visible.
    async fn resolve_community(&self, id: Snowflake) -> Result<Option<Community>>;

    /// List the guild's text channels.
    async fn channels(&self, community: &Community) -> Result<Vec<Channel>>;

    /// Stream a channel's complete message history.
    ///
    /// `order` is a hint; the returned pages declare the order actually used.
    fn history(&self, channel: &Channel, order: Order) -> Pages<'_, RawMessage>;

    /// Stream every audit log entry of one action type.
    fn audit_log(&self, community: &Community, action: AuditAction) -> Pages<'_, RawAuditEntry>;

    /// Tear down the connection.
    async fn disconnect(&self) -> Result<()>;
}
