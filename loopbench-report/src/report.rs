//! Report Data Structures

use chrono::{DateTime, Utc};
use loopbench_core::{Operation, OutputSummary, Strategy, VariantError};
use loopbench_stats::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub cases: Vec<CaseReport>,
    pub verifications: Vec<VerificationEntry>,
    pub summary: ReportSummary,
}

impl Report {
    /// Whether any variant failed or any verification disagreed
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
            || self.summary.timed_out > 0
            || self.summary.verification_failures > 0
    }

    /// Case report by name
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.case == name)
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Run configuration captured in report metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub samples: usize,
    pub timeout_ns: Option<u64>,
    pub fixture_size: usize,
    pub seed: u64,
}

/// System information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// One case and its variants, in registration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub case: String,
    pub operation: Operation,
    pub fixture_len: usize,
    /// Variant ratios are relative to this one (the first variant)
    pub baseline: Option<String>,
    pub variants: Vec<VariantReport>,
}

impl CaseReport {
    /// Variant report by name
    pub fn variant(&self, name: &str) -> Option<&VariantReport> {
        self.variants.iter().find(|v| v.variant == name)
    }

    /// Fastest successful variant by median time
    pub fn fastest(&self) -> Option<&VariantReport> {
        self.variants
            .iter()
            .filter(|v| v.status == VariantStatus::Passed)
            .min_by_key(|v| v.elapsed_ns)
    }
}

/// Single variant entry in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantReport {
    pub variant: String,
    pub strategy: Strategy,
    pub status: VariantStatus,
    /// Median sample in nanoseconds
    pub elapsed_ns: u64,
    pub metrics: Option<TimingMetrics>,
    /// Median time divided by the baseline's median time
    pub ratio: Option<f64>,
    pub output: Option<OutputSummary>,
    pub failure: Option<FailureInfo>,
}

/// Variant execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantStatus {
    Passed,
    Failed,
    TimedOut,
    Cancelled,
}

impl VariantStatus {
    /// Status for a variant outcome
    pub fn of<T>(outcome: &Result<T, VariantError>) -> Self {
        match outcome {
            Ok(_) => VariantStatus::Passed,
            Err(VariantError::Timeout { .. }) => VariantStatus::TimedOut,
            Err(VariantError::Cancelled) => VariantStatus::Cancelled,
            Err(_) => VariantStatus::Failed,
        }
    }

    /// Lowercase label used by the renderers
    pub fn label(self) -> &'static str {
        match self {
            VariantStatus::Passed => "passed",
            VariantStatus::Failed => "failed",
            VariantStatus::TimedOut => "timed out",
            VariantStatus::Cancelled => "cancelled",
        }
    }
}

/// Variant timing metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingMetrics {
    pub samples: usize,
    pub mean_ns: f64,
    pub median_ns: f64,
    pub std_dev_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
    pub p50_ns: f64,
    pub p90_ns: f64,
    pub p99_ns: f64,
    /// Relative standard deviation, percent
    #[serde(default)]
    pub cv_percent: f64,
}

impl From<&SummaryStatistics> for TimingMetrics {
    fn from(stats: &SummaryStatistics) -> Self {
        Self {
            samples: stats.sample_count,
            mean_ns: stats.mean,
            median_ns: stats.median,
            std_dev_ns: stats.std_dev,
            min_ns: stats.min,
            max_ns: stats.max,
            p50_ns: stats.p50,
            p90_ns: stats.p90,
            p99_ns: stats.p99,
            cv_percent: stats.coefficient_of_variation(),
        }
    }
}

/// Failure information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureInfo {
    pub kind: String,
    pub message: String,
}

impl From<&VariantError> for FailureInfo {
    fn from(error: &VariantError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Outcome of an equivalence check for one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationEntry {
    pub case: String,
    pub passed: bool,
    pub message: String,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_cases: usize,
    pub total_variants: usize,
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub cancelled: usize,
    pub verification_failures: usize,
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Count one variant status
    pub fn record(&mut self, status: VariantStatus) {
        self.total_variants += 1;
        match status {
            VariantStatus::Passed => self.passed += 1,
            VariantStatus::Failed => self.failed += 1,
            VariantStatus::TimedOut => self.timed_out += 1,
            VariantStatus::Cancelled => self.cancelled += 1,
        }
    }
}
