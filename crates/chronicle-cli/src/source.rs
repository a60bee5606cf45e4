//! Remote selection.

use async_trait::async_trait;

use chronicle_core::raw::{RawAuditEntry, RawMessage};
use chronicle_core::traits::{Channel, Community, Order, Pages, Remote, Session};
use chronicle_core::types::{AuditAction, Snowflake};
use chronicle_core::{Credential, Result, SourceUrl};
use chronicle_file::{FileRemote, FileSession};
use chronicle_http::{HttpRemote, HttpSession};

/// The remote picked by the configured source.
#[derive(Debug, Clone)]
pub enum CliRemote {
    File(FileRemote),
    Http(HttpRemote),
}

impl CliRemote {
    /// `file://` sources read a snapshot, everything else talks to the API.
    pub fn from_source(source: &SourceUrl) -> anyhow::Result<Self> {
        if source.is_local() {
            let path = source
                .to_file_path()
                .ok_or_else(|| anyhow::anyhow!("invalid file:// source {}", source))?;
            Ok(CliRemote::File(FileRemote::new(path)))
        } else {
            Ok(CliRemote::Http(HttpRemote::new(source.clone())))
        }
    }
}

#[async_trait]
impl Remote for CliRemote {
    type Session = CliSession;

    async fn connect(&self, credential: &Credential) -> Result<CliSession> {
        match self {
            CliRemote::File(remote) => remote.connect(credential).await.map(CliSession::File),
            CliRemote::Http(remote) => remote.connect(credential).await.map(CliSession::Http),
        }
    }
}

/// Session wrapper for CLI use.
#[derive(Debug)]
pub enum CliSession {
    File(FileSession),
    Http(HttpSession),
}

#[async_trait]
impl Session for CliSession {
    async fn resolve_community(&self, id: Snowflake) -> Result<Option<Community>> {
        match self {
            CliSession::File(session) => session.resolve_community(id).await,
            CliSession::Http(session) => session.resolve_community(id).await,
        }
    }

    async fn channels(&self, community: &Community) -> Result<Vec<Channel>> {
        match self {
            CliSession::File(session) => session.channels(community).await,
            CliSession::Http(session) => session.channels(community).await,
        }
    }

    fn history(&self, channel: &Channel, order: Order) -> Pages<'_, RawMessage> {
        match self {
            CliSession::File(session) => session.history(channel, order),
            CliSession::Http(session) => session.history(channel, order),
        }
    }

    fn audit_log(&self, community: &Community, action: AuditAction) -> Pages<'_, RawAuditEntry> {
        match self {
            CliSession::File(session) => session.audit_log(community, action),
            CliSession::Http(session) => session.audit_log(community, action),
        }
    }

    async fn disconnect(&self) -> Result<()> {
        match self {
            CliSession::File(session) => session.disconnect().await,
            CliSession::Http(session) => session.disconnect().await,
        }
    }
}
