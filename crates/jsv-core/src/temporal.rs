//! # Temporal Types — UTC-Only Report Timestamps
//!
//! Defines `Timestamp`, the instant stamped onto every single-schema and
//! batch report. Always UTC, truncated to millisecond precision, rendered
//! as `YYYY-MM-DDTHH:MM:SS.sssZ` so that reports sort lexically by time
//! and stay byte-stable for a given instant.
//!
//! Non-UTC inputs are **rejected** by [`Timestamp::parse()`], which is also
//! what deserialization goes through: a stored report whose timestamp
//! carries an offset does not load.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A UTC-only timestamp, truncated to milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating
    /// sub-millisecond components.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(3))
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// Only the `Z` suffix is accepted. Explicit offsets, even `+00:00`,
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the string is not RFC 3339
    /// or does not end in `Z`.
    pub fn parse(s: &str) -> Result<Self, String> {
        if !s.ends_with('Z') {
            return Err(format!("timestamp must use Z suffix (UTC only), got: {s:?}"));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| format!("invalid RFC 3339 timestamp {s:?}: {e}"))?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as RFC 3339 with millisecond precision and Z suffix
    /// (e.g., `2026-01-15T12:00:00.000Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_now_has_no_submillisecond_component() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn test_from_utc_truncates_to_millis() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let dt = dt.with_nanosecond(123_456_789).unwrap();
        let ts = Timestamp::from_utc(dt);
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45.123Z");
    }

    #[test]
    fn test_whole_seconds_render_three_zeros() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Timestamp::from_utc(dt).to_iso8601(), "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_display_matches_iso8601() {
        let dt = Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap();
        let ts = Timestamp::from_utc(dt);
        assert_eq!(format!("{ts}"), ts.to_iso8601());
    }

    #[test]
    fn test_parse_rejects_offsets() {
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15T17:00:00+05:00").is_err());
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_deserialize_rejects_offsets() {
        let offset = serde_json::json!("2026-01-15T17:00:00+05:00");
        assert!(serde_json::from_value::<Timestamp>(offset).is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let ts = Timestamp::parse("2026-01-15T12:00:00.250Z").unwrap();
        let json = serde_json::to_value(ts).unwrap();
        assert_eq!(json, serde_json::json!("2026-01-15T12:00:00.250Z"));
        let back: Timestamp = serde_json::from_value(json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::parse("2026-01-15T12:00:00.001Z").unwrap();
        let later = Timestamp::parse("2026-01-15T12:00:00.002Z").unwrap();
        assert!(earlier < later);
    }
}
