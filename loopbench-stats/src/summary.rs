//! Summary Statistics
//!
//! Descriptive statistics over the timing samples of one variant. Every value
//! is computed from all samples; nothing is discarded as an outlier.

use crate::percentiles::{percentile_of_sorted, sorted_samples};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary of a variant's timing samples, in nanoseconds
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub sample_count: usize,
}

/// Compute summary statistics from raw nanosecond samples
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let sorted = sorted_samples(samples);
    let n = sorted.len();

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    let p50 = percentile_of_sorted(&sorted, 50.0);

    SummaryStatistics {
        mean,
        median: p50,
        std_dev,
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        p50,
        p90: percentile_of_sorted(&sorted, 90.0),
        p99: percentile_of_sorted(&sorted, 99.0),
        sample_count: n,
    }
}

/// Compute summary statistics from measured durations
pub fn summarize_durations(samples: &[Duration]) -> SummaryStatistics {
    let nanos: Vec<f64> = samples.iter().map(|d| d.as_nanos() as f64).collect();
    compute_summary(&nanos)
}

impl SummaryStatistics {
    /// Coefficient of variation (relative stddev, percent)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let samples = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 3.0).abs() < 0.01);
        assert!((summary.median - 3.0).abs() < 0.01);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.sample_count, 5);
    }

    #[test]
    fn test_slow_sample_is_kept() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = compute_summary(&samples);

        assert_eq!(summary.max, 100.0);
        assert!(summary.mean > 10.0);
        assert!(summary.p99 > 50.0);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let summary = compute_summary(&[100.0, 100.0, 100.0]);
        assert!((summary.coefficient_of_variation() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.sample_count, 0);
        assert!((summary.mean - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_durations() {
        let summary = summarize_durations(&[Duration::from_micros(1), Duration::from_micros(3)]);
        assert!((summary.mean - 2_000.0).abs() < f64::EPSILON);
        assert_eq!(summary.sample_count, 2);
    }
}
