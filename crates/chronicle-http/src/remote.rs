//! Discord REST remote.

use async_trait::async_trait;
use tracing::{info, instrument};

use chronicle_core::error::{Error, FetchError};
use chronicle_core::traits::Remote;
use chronicle_core::{Credential, Result, SourceUrl};

use crate::client::ApiClient;
use crate::endpoints::{ApiUser, CURRENT_USER, NO_QUERY};
use crate::session::HttpSession;

/// A network remote rooted at a REST API base URL.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    api: SourceUrl,
}

impl HttpRemote {
    /// Create a remote for the given API base.
    pub fn new(api: SourceUrl) -> Self {
        Self { api }
    }

    /// Returns the API base for this remote.
    pub fn url(&self) -> &SourceUrl {
        &self.api
    }
}

impl Default for HttpRemote {
    fn default() -> Self {
        Self::new(SourceUrl::default_api())
    }
}

#[async_trait]
impl Remote for HttpRemote {
    type Session = HttpSession;

    /// Verify the bot token against the current-user endpoint.
    #[instrument(skip(self, credential), fields(api = %self.api))]
    async fn connect(&self, credential: &Credential) -> Result<HttpSession> {
        let client = ApiClient::new(self.api.clone(), credential)?;

        let me: ApiUser = client.get(CURRENT_USER, NO_QUERY).await.map_err(|e| match e {
            Error::Fetch(FetchError::Protocol(ref protocol)) if protocol.is_auth_error() => {
                Error::connection(format!("token rejected: {}", protocol))
            }
            other => other,
        })?;

        info!(user = %me.username, id = %me.id, "Authenticated");
        Ok(HttpSession::new(client))
    }
}
