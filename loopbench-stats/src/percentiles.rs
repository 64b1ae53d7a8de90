//! Percentile Computation
//!
//! Linear interpolation between nearest ranks over timing samples.

use std::time::Duration;

/// Percentiles reported for every variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentiles {
    /// 50th percentile (median)
    pub p50: f64,
    /// 90th percentile
    pub p90: f64,
    /// 99th percentile
    pub p99: f64,
}

/// Sort a copy of the samples, treating incomparable values as equal
pub fn sorted_samples(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Percentile of an already sorted slice
///
/// Returns 0.0 for an empty slice.
pub fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    let Some(&first) = sorted.first() else {
        return 0.0;
    };
    let n = sorted.len();
    if n == 1 {
        return first;
    }

    let p = (percentile / 100.0).clamp(0.0, 1.0);
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    let lower = sorted.get(lower_idx).copied().unwrap_or(first);
    let upper = sorted.get(upper_idx).copied().unwrap_or(lower);
    lower + fraction * (upper - lower)
}

/// Compute a single percentile from unsorted samples
///
/// ```
/// # use loopbench_stats::compute_percentile;
/// let samples = vec![5.0, 1.0, 3.0, 2.0, 4.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    percentile_of_sorted(&sorted_samples(samples), percentile)
}

/// Compute the reported percentiles in one sort
pub fn compute_percentiles(samples: &[f64]) -> Percentiles {
    let sorted = sorted_samples(samples);
    Percentiles {
        p50: percentile_of_sorted(&sorted, 50.0),
        p90: percentile_of_sorted(&sorted, 90.0),
        p99: percentile_of_sorted(&sorted, 99.0),
    }
}

/// Median of a set of durations, rounded to the nearest nanosecond
pub fn median_duration(samples: &[Duration]) -> Duration {
    let nanos: Vec<f64> = samples.iter().map(|d| d.as_nanos() as f64).collect();
    let median = compute_percentile(&nanos, 50.0);
    Duration::from_nanos(median.round().max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let samples = vec![10.0, 20.0];
        assert!((compute_percentile(&samples, 50.0) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tail_percentiles() {
        let samples: Vec<f64> = (1..=1000).map(|x| x as f64).collect();
        let percentiles = compute_percentiles(&samples);

        assert!(percentiles.p90 > 895.0 && percentiles.p90 < 905.0);
        assert!(percentiles.p99 > 985.0 && percentiles.p99 < 995.0);
    }

    #[test]
    fn test_single_and_empty() {
        assert!((compute_percentile(&[42.0], 99.0) - 42.0).abs() < f64::EPSILON);
        assert!((compute_percentile(&[], 50.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_median_duration() {
        let samples = [
            Duration::from_nanos(300),
            Duration::from_nanos(100),
            Duration::from_nanos(200),
        ];
        assert_eq!(median_duration(&samples), Duration::from_nanos(200));
        assert_eq!(median_duration(&[]), Duration::ZERO);
    }
}
