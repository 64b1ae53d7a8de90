#![warn(missing_docs)]
//! Loopbench Report - Report Model and Renderers
//!
//! Generates various output formats from one report shape:
//! - JSON (machine-readable)
//! - Markdown (GitHub tables, one per case)
//!
//! Terminal output lives in the CLI crate.

mod json;
mod markdown;
mod report;

pub use json::{generate_json_report, parse_json_report};
pub use markdown::generate_markdown_report;
pub use report::{
    CaseReport, FailureInfo, Report, ReportConfig, ReportMeta, ReportSummary, SCHEMA_VERSION,
    SystemInfo, TimingMetrics, VariantReport, VariantStatus, VerificationEntry,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// JSON with full schema
    Json,
    /// GitHub-flavoured markdown tables
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" | "github" => Ok(OutputFormat::Markdown),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Format nanoseconds with a unit that keeps 1-3 integer digits
pub fn format_ns(ns: f64) -> String {
    if ns >= 1_000_000_000.0 {
        format!("{:.2} s", ns / 1_000_000_000.0)
    } else if ns >= 1_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else if ns >= 1_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else {
        format!("{:.0} ns", ns)
    }
}
