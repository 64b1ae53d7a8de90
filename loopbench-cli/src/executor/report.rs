//! Report Building
//!
//! Constructs the complete report from suite results and the per-variant
//! statistics computed in parallel beforehand.
//!
//! ## Pipeline
//!
//! ```text
//! SuiteResults + SummaryStatistics
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │   TimingMetrics     │  Per-variant stats, ratio to first variant
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │      Report         │  Ready for JSON/markdown/terminal output
//!   └─────────────────────┘
//! ```

use super::metadata::build_report_meta;
use loopbench_core::{CaseResults, SuiteResults, VariantResult};
use loopbench_report::{
    CaseReport, FailureInfo, Report, ReportConfig, ReportSummary, TimingMetrics, VariantReport,
    VariantStatus,
};
use loopbench_stats::SummaryStatistics;

/// Build a complete Report from suite results
///
/// # Arguments
/// * `results` - Suite results in case order
/// * `stats` - Pre-computed statistics, same shape as `results`
/// * `config` - Run configuration recorded in the metadata
/// * `total_duration_ms` - Total execution time in milliseconds
///
/// Verifications are attached by the caller.
pub fn build_report(
    results: &SuiteResults,
    stats: &[Vec<Option<SummaryStatistics>>],
    config: ReportConfig,
    total_duration_ms: f64,
) -> Report {
    let mut summary = ReportSummary {
        total_cases: results.len(),
        total_duration_ms,
        ..Default::default()
    };

    let cases = results
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let case_stats = stats.get(i).map(Vec::as_slice).unwrap_or_default();
            let report = build_case_report(case, case_stats);
            for variant in &report.variants {
                summary.record(variant.status);
            }
            report
        })
        .collect();

    Report {
        meta: build_report_meta(config),
        cases,
        verifications: Vec::new(),
        summary,
    }
}

fn build_case_report(case: &CaseResults, stats: &[Option<SummaryStatistics>]) -> CaseReport {
    let baseline = case.baseline();
    let baseline_ns = baseline
        .filter(|b| b.is_success())
        .map(|b| b.elapsed.as_nanos() as f64)
        .filter(|ns| *ns > 0.0);

    let variants = case
        .variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let metrics = stats.get(i).cloned().flatten();
            build_variant_report(variant, metrics.as_ref(), baseline_ns)
        })
        .collect();

    CaseReport {
        case: case.case.clone(),
        operation: case.operation,
        fixture_len: case.fixture_len,
        baseline: baseline.map(|b| b.variant.clone()),
        variants,
    }
}

fn build_variant_report(
    variant: &VariantResult,
    stats: Option<&SummaryStatistics>,
    baseline_ns: Option<f64>,
) -> VariantReport {
    let elapsed_ns = variant.elapsed.as_nanos() as u64;
    let ratio = baseline_ns
        .filter(|_| variant.is_success())
        .map(|base| elapsed_ns as f64 / base);

    VariantReport {
        variant: variant.variant.clone(),
        strategy: variant.strategy,
        status: VariantStatus::of(&variant.outcome),
        elapsed_ns,
        metrics: stats.map(TimingMetrics::from),
        ratio,
        output: variant.output().cloned(),
        failure: variant.error().map(FailureInfo::from),
    }
}
