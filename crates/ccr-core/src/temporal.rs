//! # Temporal Types — UTC-Only Timestamps
//!
//! `Timestamp` is the block time stamped onto every registry call, the
//! `last_review_date` of a profile, and the start of a decryption request's
//! validity window.
//!
//! ## Security Invariant
//!
//! Timestamps are UTC and truncated to seconds. Their canonical form is
//! `YYYY-MM-DDTHH:MM:SSZ`, so a decryption request signed by a client and
//! re-canonicalized by the server produce identical bytes. Non-UTC strings
//! are rejected by [`Timestamp::parse()`].

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CcrError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 string. Only the `Z` suffix is accepted; even
    /// `+00:00` is rejected.
    pub fn parse(s: &str) -> Result<Self, CcrError> {
        if !s.ends_with('Z') {
            return Err(CcrError::Validation(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| CcrError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    pub fn from_epoch_secs(secs: i64) -> Result<Self, CcrError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| CcrError::Validation(format!("epoch seconds out of range: {secs}")))
    }

    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// This timestamp shifted forward by whole days, or `None` on overflow.
    pub fn checked_add_days(&self, days: u32) -> Option<Self> {
        self.0
            .checked_add_signed(Duration::days(i64::from(days)))
            .map(Self)
    }

    /// Render as ISO8601 with Z suffix.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
