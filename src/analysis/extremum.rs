//! Windowed extremum search over a price series.

use crate::types::{PriceSample, TimeSeries};
use serde::{Deserialize, Serialize};

/// Which extremum to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extremum {
    Max,
    Min,
}

impl Extremum {
    /// Whether `candidate` strictly beats `current` for this extremum.
    fn improves(self, candidate: f64, current: f64) -> bool {
        match self {
            Extremum::Max => candidate > current,
            Extremum::Min => candidate < current,
        }
    }
}

/// Find the highest or lowest priced sample among those whose timestamp
/// satisfies `in_window`.
///
/// Returns `None` when no sample falls in the window. Ties go to the sample
/// encountered first.
pub fn find_extremum<F>(series: &TimeSeries, in_window: F, kind: Extremum) -> Option<PriceSample>
where
    F: Fn(i64) -> bool,
{
    series
        .iter()
        .filter(|sample| in_window(sample.timestamp))
        .fold(None, |best: Option<PriceSample>, sample| match best {
            Some(current) if !kind.improves(sample.price, current.price) => Some(current),
            _ => Some(*sample),
        })
}
