//! Snapshot-directory remote.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, instrument};

use chronicle_core::error::Error;
use chronicle_core::traits::Remote;
use chronicle_core::{Credential, Result};

use crate::session::FileSession;
use crate::store::SnapshotStore;

/// A remote that reads a snapshot directory instead of the network.
#[derive(Debug, Clone)]
pub struct FileRemote {
    store: SnapshotStore,
}

impl FileRemote {
    /// Create a remote for the snapshot at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            store: SnapshotStore::new(root),
        }
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}

#[async_trait]
impl Remote for FileRemote {
    type Session = FileSession;

    /// Opens the snapshot. If it carries a `token` file, the credential must
    /// match it.
    #[instrument(skip(self, credential), fields(root = %self.store.root().display()))]
    async fn connect(&self, credential: &Credential) -> Result<FileSession> {
        if !self.store.root().is_dir() {
            return Err(Error::connection(format!(
                "snapshot directory {} does not exist",
                self.store.root().display()
            )));
        }

        if let Some(expected) = self.store.expected_token()? {
            if expected != credential.as_str() {
                return Err(Error::connection("token rejected by snapshot"));
            }
        }

        debug!("Opened snapshot");
        Ok(FileSession::new(self.store.clone()))
    }
}
