//! Timestamp type with a fixed, sortable rendering.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Rendering used for every timestamp written to an archive.
///
/// Always UTC and always six fractional digits, so byte order of the rendered
/// strings equals chronological order.
const RENDER_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f+00:00";

/// A UTC instant.
///
/// Deserializes from RFC 3339 (the REST API form), serializes back to RFC
/// 3339; use [`Timestamp::render`] for the archive representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a chrono instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Build from milliseconds since the Unix epoch.
    ///
    /// Out-of-range values clamp to the Unix epoch.
    pub fn from_unix_millis(ms: i64) -> Self {
        Self(Utc.timestamp_millis_opt(ms).single().unwrap_or_default())
    }

    /// Returns the inner instant.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Render as `YYYY-MM-DD HH:MM:SS.ffffff+00:00`.
    pub fn render(&self) -> String {
        self.0.format(RENDER_FORMAT).to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RENDER_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_width() {
        let ts = Timestamp::from_unix_millis(1_614_834_367_000);
        assert_eq!(ts.render(), "2021-03-04 05:06:07.000000+00:00");
    }

    #[test]
    fn render_order_matches_time_order() {
        let earlier = Timestamp::from_unix_millis(1_614_834_367_000);
        let later = Timestamp::from_unix_millis(1_614_834_367_500);
        assert!(earlier.render() < later.render());
        assert!(earlier < later);
    }

    #[test]
    fn parses_rest_api_form() {
        let ts: Timestamp = serde_json::from_str("\"2021-03-04T05:06:07.123000+00:00\"").unwrap();
        assert_eq!(ts.render(), "2021-03-04 05:06:07.123000+00:00");
    }
}
