//! Snowflake identifier type.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Timestamp;
use crate::error::{Error, InvalidInputError};

/// Milliseconds between the Unix epoch and the first second of 2015.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// A 64-bit snowflake identifier.
///
/// Snowflakes embed their creation time in the upper 42 bits, so ordering by
/// snowflake is ordering by creation. They are serialized as strings because
/// JSON consumers commonly lose precision above 2^53.
///
/// # Example
///
/// ```
/// use chronicle_core::Snowflake;
///
/// let id: Snowflake = "175928847299117063".parse().unwrap();
/// assert_eq!(id.created_at().render(), "2016-04-30 11:18:25.796000+00:00");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Snowflake(u64);

impl Snowflake {
    /// Wrap a raw identifier.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Build the smallest snowflake minted at `unix_ms`, with `sequence` in
    /// the low bits.
    pub fn from_unix_millis(unix_ms: u64, sequence: u64) -> Self {
        let since_epoch = unix_ms.saturating_sub(DISCORD_EPOCH_MS);
        Self((since_epoch << 22) | (sequence & 0x3f_ffff))
    }

    /// Parse a decimal snowflake.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not an unsigned 64-bit integer.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| {
                InvalidInputError::Snowflake {
                    value: s.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which this id was minted.
    pub fn unix_millis(self) -> u64 {
        (self.0 >> 22) + DISCORD_EPOCH_MS
    }

    /// Creation time encoded in the identifier.
    pub fn created_at(self) -> Timestamp {
        Timestamp::from_unix_millis(self.unix_millis() as i64)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for Snowflake {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

/// Accepts both the string form used by the REST API and bare integers.
struct SnowflakeVisitor;

impl Visitor<'_> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a decimal string or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
        Ok(Snowflake(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Snowflake, E> {
        u64::try_from(v)
            .map(Snowflake)
            .map_err(|_| E::custom("snowflake must not be negative"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
        Snowflake::parse(v).map_err(E::custom)
    }
}
