//! Conversion of human-entered trigger times into Unix timestamps.
//!
//! Times without an explicit offset are read as UTC.

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

/// Accepted offset-less layouts, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y%m%d %H:%M",
    "%Y%m%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriggerTimeError {
    #[error("Trigger time is empty")]
    Empty,

    #[error("Invalid date format '{input}'. Use YYYYMMDD HH:mm")]
    InvalidFormat { input: String },
}

/// Parse a trigger time such as `20240115 13:45` into Unix seconds (UTC).
///
/// RFC 3339 strings with an offset are honoured as given.
pub fn parse_trigger_time(input: &str) -> Result<i64, TriggerTimeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TriggerTimeError::Empty);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.timestamp());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc().timestamp())
        .ok_or_else(|| TriggerTimeError::InvalidFormat {
            input: input.to_string(),
        })
}
