//! Remote source URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated URL naming where guild history is read from.
///
/// Supports both the network REST API (HTTPS, or HTTP for localhost) and
/// local snapshot directories (`file://`).
///
/// # Example
///
/// ```
/// use chronicle_core::SourceUrl;
///
/// let api = SourceUrl::new("https://discord.com/api/v10").unwrap();
/// assert_eq!(api.endpoint("guilds/1/channels"),
///            "https://discord.com/api/v10/guilds/1/channels");
///
/// let snapshot = SourceUrl::new("file:///tmp/guild-snapshot").unwrap();
/// assert!(snapshot.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Base URL of the public REST API.
    pub const DEFAULT_API: &'static str = "https://discord.com/api/v10";

    /// Create a new source URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::SourceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// The default REST API source.
    pub fn default_api() -> Self {
        Self(Url::parse(Self::DEFAULT_API).expect("default API URL is valid"))
    }

    /// Returns the URL of an API endpoint under this base.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns true if this names a local snapshot directory (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true if this names a network API (http:// or https:// URL).
    pub fn is_network(&self) -> bool {
        let scheme = self.0.scheme();
        scheme == "http" || scheme == "https"
    }

    /// Returns the filesystem path for file:// URLs.
    ///
    /// Returns `None` for non-file URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::SourceUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();

        if scheme == "file" {
            if url.path().is_empty() || url.path() == "/" {
                return Err(InvalidInputError::SourceUrl {
                    value: original.to_string(),
                    reason: "file:// URL must name a directory".to_string(),
                }
                .into());
            }
            return Ok(());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::SourceUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::SourceUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for SourceUrl {
    fn default() -> Self {
        Self::default_api()
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SourceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for SourceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SourceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_public_api() {
        let source = SourceUrl::default();
        assert!(source.is_network());
        assert_eq!(
            source.endpoint("users/@me"),
            "https://discord.com/api/v10/users/@me"
        );
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let source = SourceUrl::new("http://localhost:8080/").unwrap();
        assert_eq!(source.endpoint("/guilds/1"), "http://localhost:8080/guilds/1");
    }

    #[test]
    fn rejects_plain_http_remote() {
        assert!(SourceUrl::new("http://discord.com/api").is_err());
    }

    #[test]
    fn rejects_relative() {
        assert!(SourceUrl::new("guilds/1").is_err());
    }

    #[test]
    fn file_url_to_path() {
        #[cfg(unix)]
        {
            let source = SourceUrl::new("file:///tmp/snapshot").unwrap();
            assert!(source.is_local());
            assert!(!source.is_network());
            assert_eq!(
                source.to_file_path().unwrap(),
                std::path::PathBuf::from("/tmp/snapshot")
            );
        }
    }

    #[test]
    fn network_url_has_no_path() {
        let source = SourceUrl::new("https://discord.com/api/v10").unwrap();
        assert!(source.to_file_path().is_none());
    }
}
