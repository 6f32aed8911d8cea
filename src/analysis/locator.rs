//! Nearest-sample lookup.
//!
//! Upstream history is sampled at a coarser granularity than arbitrary
//! trigger times, so the trigger price is found by proximity rather than by
//! exact timestamp match.

use crate::analysis::error::AnalysisError;
use crate::types::{PriceSample, TimeSeries};

/// Return the sample whose timestamp is closest to `target`.
///
/// Linear scan; on equal distance the earliest-encountered sample is kept.
pub fn locate(series: &TimeSeries, target: i64) -> Result<PriceSample, AnalysisError> {
    let (first, rest) = series
        .samples()
        .split_first()
        .ok_or(AnalysisError::EmptySeries)?;

    let mut closest = *first;
    let mut best_distance = distance(closest.timestamp, target);

    for sample in rest {
        let d = distance(sample.timestamp, target);
        // strict: first minimum wins
        if d < best_distance {
            closest = *sample;
            best_distance = d;
        }
    }

    Ok(closest)
}

fn distance(timestamp: i64, target: i64) -> u64 {
    timestamp.abs_diff(target)
}
