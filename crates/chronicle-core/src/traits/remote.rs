//! Remote trait.

use async_trait::async_trait;

use crate::{Credential, Result};

use super::Session;

/// A place guild history can be read from.
#[async_trait]
pub trait Remote: Send + Sync {
    /// Session type for this remote.
    type Session: Session;

    /// Authenticate and open a session.
    async fn connect(&self, credential: &Credential) -> Result<Self::Session>;
}
