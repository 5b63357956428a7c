//! ISO-8601 timestamp encoding for stored documents.
//!
//! Timestamps are stored as strings with microsecond precision and an
//! explicit `+00:00` offset. Parsing also accepts other RFC 3339 offsets
//! and naive datetimes, which are taken as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Formats `at` for storage.
#[must_use]
pub fn to_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parses a stored timestamp back into UTC.
///
/// # Errors
///
/// Returns the parse error if `raw` is neither RFC 3339 nor a naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` datetime.
pub fn parse_iso(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => Ok(at.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}
