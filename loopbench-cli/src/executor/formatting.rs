//! Output Formatting
//!
//! Human-readable output formatting for comparison reports.
//!
//! Generates terminal-friendly output with:
//! - One block per case with status icons (✓/✗/⏱/⊘)
//! - Median time and ratio to the first variant
//! - Spread (mean, stddev, p90/p99) and an output preview
//! - Verification results and a run summary

use loopbench_report::{CaseReport, Report, VariantStatus, format_ns};

/// Coefficient of variation (percent) above which a variant is flagged noisy
const NOISY_CV_PERCENT: f64 = 10.0;

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Loopbench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for case in &report.cases {
        format_case(&mut output, case);
    }

    if !report.verifications.is_empty() {
        output.push_str("\nVerifications\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for v in &report.verifications {
            let icon = if v.passed { "✓" } else { "✗" };
            output.push_str(&format!("  {} {} : {}\n", icon, v.case, v.message));
        }
    }

    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Cases: {}  Variants: {}  Passed: {}  Failed: {}  Timed out: {}  Cancelled: {}\n",
        report.summary.total_cases,
        report.summary.total_variants,
        report.summary.passed,
        report.summary.failed,
        report.summary.timed_out,
        report.summary.cancelled
    ));
    if report.summary.verification_failures > 0 {
        output.push_str(&format!(
            "  Verification failures: {}\n",
            report.summary.verification_failures
        ));
    }
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

fn format_case(output: &mut String, case: &CaseReport) {
    output.push_str(&format!(
        "Case: {} ({}, {} elements)\n",
        case.case, case.operation, case.fixture_len
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    let width = case
        .variants
        .iter()
        .map(|v| v.variant.len())
        .max()
        .unwrap_or(12);
    let fastest = case.fastest().map(|v| v.variant.as_str());

    for variant in &case.variants {
        let status_icon = match variant.status {
            VariantStatus::Passed => "✓",
            VariantStatus::Failed => "✗",
            VariantStatus::TimedOut => "⏱",
            VariantStatus::Cancelled => "⊘",
        };

        let timing = match &variant.metrics {
            Some(_) => format_ns(variant.elapsed_ns as f64),
            None => "-".to_string(),
        };
        let ratio = variant
            .ratio
            .map(|r| format!("{:.2}x", r))
            .unwrap_or_else(|| "-".to_string());
        let marker = if fastest == Some(variant.variant.as_str()) && case.variants.len() > 1 {
            "  (fastest)"
        } else {
            ""
        };

        output.push_str(&format!(
            "  {} {:<width$}  {:>12}  {:>8}{}\n",
            status_icon,
            variant.variant,
            timing,
            ratio,
            marker,
            width = width
        ));

        if let Some(metrics) = &variant.metrics {
            output.push_str(&format!(
                "      mean: {}  stddev: {}  p90: {}  p99: {}  samples: {}\n",
                format_ns(metrics.mean_ns),
                format_ns(metrics.std_dev_ns),
                format_ns(metrics.p90_ns),
                format_ns(metrics.p99_ns),
                metrics.samples
            ));
            if metrics.cv_percent >= NOISY_CV_PERCENT {
                output.push_str(&format!(
                    "      noisy: {:.1}% variation\n",
                    metrics.cv_percent
                ));
            }
        }

        if let Some(out) = &variant.output {
            output.push_str(&format!(
                "      output: {} element(s) {}\n",
                out.elements, out.preview
            ));
        }

        if let Some(failure) = &variant.failure {
            output.push_str(&format!("      error: {}\n", failure.message));
        }
    }

    output.push('\n');
}
