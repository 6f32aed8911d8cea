//! Formatting of derived metrics: durations, percentages and market caps.

use crate::analysis::error::AnalysisError;
use crate::analysis::types::{
    DurationBreakdown, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// Split the time between `start_unix` and `end_unix` into days, hours and
/// minutes. An end before the start is rejected.
pub fn format_duration(start_unix: i64, end_unix: i64) -> Result<DurationBreakdown, AnalysisError> {
    let delta = end_unix
        .checked_sub(start_unix)
        .filter(|delta| *delta >= 0)
        .ok_or(AnalysisError::InvalidDuration {
            start: start_unix,
            end: end_unix,
        })?;

    Ok(DurationBreakdown {
        days: delta / SECONDS_PER_DAY,
        hours: (delta % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
        minutes: (delta % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        seconds: delta % SECONDS_PER_MINUTE,
    })
}

/// Two decimals with a trailing `%`, e.g. `400.00%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Two decimals, no grouping.
pub fn format_market_cap(value: f64) -> String {
    format!("{:.2}", value)
}
