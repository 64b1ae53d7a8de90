//! Case Execution
//!
//! Drives the runner across the planned cases with a progress bar. The runner
//! itself keeps variants sequential and records per-variant failures; this
//! layer only adds ordering, selection and progress reporting.
//!
//! ## Data Flow
//!
//! ```text
//! ExecutionPlan (case names, registration order)
//!        │
//!        ▼
//!   ExecutionConfig (variant selection)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │     Executor     │  Runner::run per case, cancellation between variants
//! └────────┬─────────┘
//!          │
//!          ▼
//!    SuiteResults (samples, outputs, errors)
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use loopbench_core::{RegistryError, Runner, SuiteResults};

/// Configuration for case execution
#[derive(Debug, Clone, Default)]
pub struct ExecutionConfig {
    /// Variant names to run in every case; empty runs all variants
    pub variants: Vec<String>,
    /// Suppress the progress bar
    pub quiet: bool,
}

/// Execute planned cases on a runner
pub struct Executor<'a> {
    runner: &'a Runner,
    config: ExecutionConfig,
}

impl<'a> Executor<'a> {
    /// Create an executor over a populated runner
    pub fn new(runner: &'a Runner, config: ExecutionConfig) -> Self {
        Self { runner, config }
    }

    /// Run the given cases in order
    ///
    /// Fails only on lookup errors (unknown case or variant). Variant
    /// failures, timeouts and cancellations end up inside the results.
    pub fn execute(&self, cases: &[&str]) -> Result<SuiteResults, RegistryError> {
        let pb = if self.config.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(cases.len() as u64)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let selection: Vec<&str> = self.config.variants.iter().map(String::as_str).collect();
        let selection = (!selection.is_empty()).then_some(selection.as_slice());

        let mut results = Vec::with_capacity(cases.len());
        for case in cases {
            pb.set_message(case.to_string());
            results.push(self.runner.run(case, selection)?);
            pb.inc(1);
        }

        if self.runner.cancellation_token().is_cancelled() {
            pb.abandon_with_message("Cancelled");
        } else {
            pb.finish_with_message("Complete");
        }
        Ok(results.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopbench_core::{Case, Operation, RunSettings};

    fn runner() -> Runner {
        let mut runner = Runner::with_settings(RunSettings {
            samples: 1,
            timeout: None,
        });
        for name in ["first", "second"] {
            let case = Case::new(name, Operation::Reduce, vec![1_i64, 2, 3])
                .iterator(|xs| Ok(xs.iter().sum::<i64>()))
                .declarative(|xs| Ok(xs.iter().copied().fold(0, i64::wrapping_add)));
            runner.register(case).unwrap();
        }
        runner
    }

    fn quiet(variants: &[&str]) -> ExecutionConfig {
        ExecutionConfig {
            variants: variants.iter().map(|v| v.to_string()).collect(),
            quiet: true,
        }
    }

    #[test]
    fn test_executes_in_plan_order() {
        let runner = runner();
        let results = Executor::new(&runner, quiet(&[]))
            .execute(&["second", "first"])
            .unwrap();
        assert_eq!(results.case_names(), ["second", "first"]);
        assert_eq!(results.get("first").unwrap().variants.len(), 2);
    }

    #[test]
    fn test_variant_selection() {
        let runner = runner();
        let results = Executor::new(&runner, quiet(&["declarative"]))
            .execute(&["first"])
            .unwrap();
        assert_eq!(results.get("first").unwrap().variant_names(), ["declarative"]);
    }

    #[test]
    fn test_unknown_variant_is_an_error() {
        let runner = runner();
        let err = Executor::new(&runner, quiet(&["indexed_loop"]))
            .execute(&["first"])
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownVariant { .. }));
    }
}
