//! Markdown Output
//!
//! GitHub-flavoured tables, one per case, in the same column order the
//! terminal output uses.

use crate::format_ns;
use crate::report::{CaseReport, Report, VariantReport};
use std::fmt::Write as _;

/// Generate a markdown report with one table per case.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Loopbench Results\n\n");
    let _ = writeln!(
        output,
        "{} samples per variant, fixture size {}, seed {}\n",
        report.meta.config.samples, report.meta.config.fixture_size, report.meta.config.seed
    );

    for case in &report.cases {
        write_case(&mut output, case);
    }

    if !report.verifications.is_empty() {
        output.push_str("## Verification\n\n");
        output.push_str("| Case | Result | Details |\n");
        output.push_str("|------|--------|---------|\n");
        for v in &report.verifications {
            let result = if v.passed { "✅ equivalent" } else { "❌ mismatch" };
            let _ = writeln!(
                output,
                "| `{}` | {} | {} |",
                v.case,
                result,
                escape_cell(&v.message)
            );
        }
        output.push('\n');
    }

    let s = &report.summary;
    output.push_str("## Summary\n\n");
    let _ = writeln!(
        output,
        "**{}** cases, **{}** variants: {} passed, {} failed, {} timed out, {} cancelled ({:.2} ms)",
        s.total_cases,
        s.total_variants,
        s.passed,
        s.failed,
        s.timed_out,
        s.cancelled,
        s.total_duration_ms
    );

    output
}

fn write_case(output: &mut String, case: &CaseReport) {
    let _ = writeln!(
        output,
        "## `{}` ({}, {} elements)\n",
        case.case, case.operation, case.fixture_len
    );
    output.push_str("| Variant | Strategy | Median | Mean | StdDev | Ratio | Status | Output |\n");
    output.push_str("|---------|----------|-------:|-----:|-------:|------:|--------|--------|\n");

    for variant in &case.variants {
        let _ = writeln!(
            output,
            "| `{}` | {} | {} | {} | {} | {} | {} | {} |",
            variant.variant,
            variant.strategy,
            median_cell(variant),
            variant
                .metrics
                .as_ref()
                .map_or_else(|| "-".to_string(), |m| format_ns(m.mean_ns)),
            variant
                .metrics
                .as_ref()
                .map_or_else(|| "-".to_string(), |m| format_ns(m.std_dev_ns)),
            variant
                .ratio
                .map_or_else(|| "-".to_string(), |r| format!("{r:.2}")),
            variant.status.label(),
            outcome_cell(variant),
        );
    }
    output.push('\n');
}

fn median_cell(variant: &VariantReport) -> String {
    if variant.metrics.is_some() {
        format_ns(variant.elapsed_ns as f64)
    } else {
        "-".to_string()
    }
}

fn outcome_cell(variant: &VariantReport) -> String {
    match (&variant.output, &variant.failure) {
        (Some(output), _) => format!(
            "{} × `{}`",
            output.elements,
            escape_cell(&output.preview)
        ),
        (None, Some(failure)) => escape_cell(&failure.message),
        (None, None) => "-".to_string(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_report;

    #[test]
    fn test_one_table_per_case() {
        let md = generate_markdown_report(&sample_report());
        assert!(md.contains("## `map_numeric` (map, 3 elements)"));
        assert!(md.contains("| Variant | Strategy | Median |"));
        assert!(md.contains("| `indexed_loop` | indexed_loop |"));
        assert!(md.contains("| 1.00 | passed | 3 × `[2, 4, 6]` |"));
    }

    #[test]
    fn test_failure_row_and_summary() {
        let md = generate_markdown_report(&sample_report());
        assert!(md.contains("| - | - | - | - | failed | variant execution failed: boom |"));
        assert!(md.contains("1 passed, 1 failed"));
    }

    #[test]
    fn test_pipes_are_escaped() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }
}
