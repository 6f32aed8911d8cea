//! Error types for the analysis engine

use thiserror::Error;

/// Failures of a single analysis call.
///
/// Absent sub-results (no pre-trigger high, zero trigger price) are not
/// errors; they show up as `None` fields in the result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No price data found")]
    EmptySeries,

    #[error("No price data at or after trigger timestamp {trigger}")]
    InsufficientPostTriggerData { trigger: i64 },

    #[error("Invalid duration: end {end} is before start {start}")]
    InvalidDuration { start: i64, end: i64 },
}
