#![warn(missing_docs)]
//! Loopbench Statistics
//!
//! Descriptive statistics over repeated variant timings:
//! - Percentiles with linear interpolation between ranks
//! - Mean, median, standard deviation, extremes
//!
//! No warm-up modelling, outlier rejection or resampling happens here.

mod percentiles;
mod summary;

pub use percentiles::{
    Percentiles, compute_percentile, compute_percentiles, median_duration, percentile_of_sorted,
    sorted_samples,
};
pub use summary::{SummaryStatistics, compute_summary, summarize_durations};

/// Default number of timed samples per variant
pub const DEFAULT_SAMPLE_COUNT: usize = 10;
