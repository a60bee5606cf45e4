//! REST HTTP client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use chronicle_core::error::{ConfigError, Error, FetchError, ProtocolError};
use chronicle_core::{Credential, Result, SourceUrl};

use crate::endpoints::{ApiErrorResponse, RateLimitResponse};

/// Attempts per request before a rate limit becomes an error.
pub const MAX_ATTEMPTS: u32 = 5;

/// Fallback wait when a 429 carries no usable `retry_after`.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let fetch = if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode {
            message: err.to_string(),
        }
    } else {
        FetchError::Transport {
            message: err.to_string(),
        }
    };
    Error::Fetch(fetch)
}

/// Authenticated HTTP client for the bot REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api: SourceUrl,
}

impl ApiClient {
    /// Create a client that authenticates every request with `credential`.
    pub fn new(api: SourceUrl, credential: &Credential) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {}", credential.as_str())).map_err(|_| {
            ConfigError::Invalid {
                field: "token",
                reason: "contains characters not allowed in a header".into(),
            }
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent(concat!("chronicle/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::connection)?;

        Ok(Self { client, api })
    }

    /// Returns the API base this client talks to.
    pub fn api(&self) -> &SourceUrl {
        &self.api
    }

    /// GET `path` and decode the body.
    ///
    /// Rate-limited requests are retried after the wait the API asks for.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get<Q, R>(&self, path: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(path, query).await?;
        self.handle_response(response).await
    }

    /// Like [`ApiClient::get`], but a 404 yields `None`.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get_optional<Q, R>(&self, path: &str, query: &Q) -> Result<Option<R>>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(path, query).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "Not found");
            return Ok(None);
        }
        self.handle_response(response).await.map(Some)
    }

    async fn send<Q>(&self, path: &str, query: &Q) -> Result<reqwest::Response>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
    {
        let url = self.api.endpoint(path);
        debug!(path, "GET");
        trace!(?query, "query parameters");

        for attempt in 1..=MAX_ATTEMPTS {
            let response = self
                .client
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(map_reqwest)?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            let wait = retry_after(response).await;
            warn!(path, attempt, wait_ms = wait.as_millis() as u64, "Rate limited");
            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(wait).await;
            }
        }

        Err(FetchError::RateLimited {
            attempts: MAX_ATTEMPTS,
        }
        .into())
    }

    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let body = response.bytes().await.map_err(map_reqwest)?;
            serde_json::from_slice(&body).map_err(|e| {
                FetchError::Decode {
                    message: e.to_string(),
                }
                .into()
            })
        } else {
            let error = self.parse_error_response(response).await;
            Err(FetchError::Protocol(error).into())
        }
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.code, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}

/// How long a 429 asks us to wait.
async fn retry_after(response: reqwest::Response) -> Duration {
    let header = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok());

    let body = response
        .json::<RateLimitResponse>()
        .await
        .ok()
        .map(|body| body.retry_after);

    body.or(header)
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
        .unwrap_or(DEFAULT_RETRY_AFTER)
}
