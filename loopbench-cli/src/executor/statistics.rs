//! Statistics Computation
//!
//! Parallel computation of summary statistics for variant samples.
//!
//! Uses Rayon to parallelize statistics computation across cases. Each
//! variant's samples are processed independently to compute:
//! - Central tendency (mean, median)
//! - Dispersion (std dev, min, max)
//! - Percentiles (p50, p90, p99)

use loopbench_core::{CaseResults, SuiteResults};
use loopbench_stats::{SummaryStatistics, summarize_durations};
use rayon::prelude::*;

/// Compute statistics for every variant (parallelized with Rayon)
///
/// The outer vector follows case order, the inner one variant order. Returns
/// `None` for variants with no samples (failed on the first repetition or
/// cancelled).
pub fn compute_statistics(results: &SuiteResults) -> Vec<Vec<Option<SummaryStatistics>>> {
    let cases: Vec<&CaseResults> = results.iter().collect();
    cases
        .par_iter()
        .map(|case| {
            case.variants
                .iter()
                .map(|v| (!v.samples.is_empty()).then(|| summarize_durations(&v.samples)))
                .collect()
        })
        .collect()
}
