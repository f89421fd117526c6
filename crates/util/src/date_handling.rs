//! # Date Handling Utilities
//!
//! The backend serializes timestamps in whatever form its framework prefers:
//! HTTP-date / RFC 2822 (`Tue, 02 Jan 2024 03:04:05 GMT`), RFC 3339, or a
//! naive ISO-8601 value without an offset. This module normalizes all of them
//! to the local time zone for display.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Naive layouts accepted when the server omits an offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a server timestamp into local time.
///
/// Naive timestamps are interpreted as local wall-clock time. Returns `None`
/// for empty or unrecognized input.
///
/// # Example
/// ```rust
/// use stackwatch_util::date_handling::parse_server_timestamp;
///
/// assert!(parse_server_timestamp("Tue, 02 Jan 2024 03:04:05 GMT").is_some());
/// assert!(parse_server_timestamp("2024-01-02T03:04:05Z").is_some());
/// assert!(parse_server_timestamp("2024-01-02T03:04:05.123456").is_some());
/// assert!(parse_server_timestamp("yesterday").is_none());
/// ```
pub fn parse_server_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.with_timezone(&Local));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Local));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}
