//! Run results
//!
//! Results are transient: created by a run, handed to the caller, rendered,
//! dropped. Ordering always follows registration order.

use crate::case::{Operation, Strategy};
use crate::error::VariantError;
use crate::output::OutputSummary;
use loopbench_stats::median_duration;
use std::time::Duration;

/// Outcome of one variant within a run
#[derive(Debug, Clone, PartialEq)]
pub struct VariantResult {
    /// Variant name
    pub variant: String,
    /// Iteration idiom
    pub strategy: Strategy,
    /// Median of the collected samples (zero when none were collected)
    pub elapsed: Duration,
    /// One duration per completed repetition
    pub samples: Vec<Duration>,
    /// Output summary, or the error that ended the measurement
    pub outcome: Result<OutputSummary, VariantError>,
}

impl VariantResult {
    pub(crate) fn succeeded(
        variant: &str,
        strategy: Strategy,
        samples: Vec<Duration>,
        summary: OutputSummary,
    ) -> Self {
        Self {
            variant: variant.to_string(),
            strategy,
            elapsed: median_duration(&samples),
            samples,
            outcome: Ok(summary),
        }
    }

    pub(crate) fn failed(
        variant: &str,
        strategy: Strategy,
        samples: Vec<Duration>,
        error: VariantError,
    ) -> Self {
        Self {
            variant: variant.to_string(),
            strategy,
            elapsed: median_duration(&samples),
            samples,
            outcome: Err(error),
        }
    }

    pub(crate) fn cancelled(variant: &str, strategy: Strategy) -> Self {
        Self::failed(variant, strategy, Vec::new(), VariantError::Cancelled)
    }

    /// Whether the variant completed every sample
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Output summary of a successful variant
    pub fn output(&self) -> Option<&OutputSummary> {
        self.outcome.as_ref().ok()
    }

    /// Error of a failed variant
    pub fn error(&self) -> Option<&VariantError> {
        self.outcome.as_ref().err()
    }
}

/// Results of one case, in variant registration order
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResults {
    /// Case name
    pub case: String,
    /// Transformation the variants implement
    pub operation: Operation,
    /// Number of fixture elements
    pub fixture_len: usize,
    /// One entry per requested variant
    pub variants: Vec<VariantResult>,
}

impl CaseResults {
    /// Result for a variant by name
    pub fn get(&self, variant: &str) -> Option<&VariantResult> {
        self.variants.iter().find(|r| r.variant == variant)
    }

    /// Variant names in result order
    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|r| r.variant.as_str()).collect()
    }

    /// Failed variants
    pub fn failures(&self) -> impl Iterator<Item = &VariantResult> {
        self.variants.iter().filter(|r| !r.is_success())
    }

    /// First variant, used as the baseline for ratios
    pub fn baseline(&self) -> Option<&VariantResult> {
        self.variants.first()
    }
}

/// Results of every case in a suite run, in case registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteResults {
    cases: Vec<CaseResults>,
}

impl SuiteResults {
    /// Wrap per-case results
    pub fn new(cases: Vec<CaseResults>) -> Self {
        Self { cases }
    }

    /// Results for a case by name
    pub fn get(&self, case: &str) -> Option<&CaseResults> {
        self.cases.iter().find(|c| c.case == case)
    }

    /// Case results in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CaseResults> {
        self.cases.iter()
    }

    /// Case names in registration order
    pub fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.case.as_str()).collect()
    }

    /// Number of cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no cases ran
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Consume into the per-case results
    pub fn into_cases(self) -> Vec<CaseResults> {
        self.cases
    }
}

impl FromIterator<CaseResults> for SuiteResults {
    fn from_iter<I: IntoIterator<Item = CaseResults>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_median_sample() {
        let summary = OutputSummary {
            elements: 0,
            preview: "[]".to_string(),
            fingerprint: 0,
        };
        let result = VariantResult::succeeded(
            "v",
            Strategy::Custom,
            vec![
                Duration::from_nanos(50),
                Duration::from_nanos(10),
                Duration::from_nanos(30),
            ],
            summary,
        );
        assert_eq!(result.elapsed, Duration::from_nanos(30));
        assert!(result.is_success());
    }

    #[test]
    fn test_cancelled_entry() {
        let result = VariantResult::cancelled("v", Strategy::Declarative);
        assert_eq!(result.error(), Some(&VariantError::Cancelled));
        assert_eq!(result.elapsed, Duration::ZERO);
    }
}
