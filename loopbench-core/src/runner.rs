//! Case registry and runner
//!
//! Cases are kept in registration order and looked up by name. Variants run
//! strictly one after another on the calling thread.

use crate::cancel::CancellationToken;
use crate::case::Benchmark;
use crate::error::{RegistryError, VerifyError};
use crate::result::{CaseResults, SuiteResults, VariantResult};
use fxhash::{FxHashMap, FxHashSet};
use loopbench_stats::DEFAULT_SAMPLE_COUNT;
use std::time::Duration;

/// Measurement settings applied to every variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Timed repetitions per variant (values below 1 are treated as 1)
    pub samples: usize,
    /// Soft budget for each individual sample, not for the variant as a
    /// whole; a sample over it is reported, never interrupted
    pub timeout: Option<Duration>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLE_COUNT,
            timeout: None,
        }
    }
}

/// Registry of cases plus the logic to run and verify them
#[derive(Default)]
pub struct Runner {
    cases: Vec<Box<dyn Benchmark>>,
    index: FxHashMap<String, usize>,
    settings: RunSettings,
    cancellation: CancellationToken,
}

impl Runner {
    /// Create an empty runner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty runner with explicit settings
    pub fn with_settings(settings: RunSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Current settings
    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Token that cancels this runner's future variant executions
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Register a case under its unique name
    pub fn register<B>(&mut self, case: B) -> Result<(), RegistryError>
    where
        B: Benchmark + 'static,
    {
        self.register_boxed(Box::new(case))
    }

    /// Register an already boxed case
    pub fn register_boxed(&mut self, case: Box<dyn Benchmark>) -> Result<(), RegistryError> {
        let name = case.name().to_string();
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateCase(name));
        }

        let mut seen = FxHashSet::default();
        for (variant, _) in case.variants() {
            if !seen.insert(variant) {
                return Err(RegistryError::DuplicateVariant {
                    case: name,
                    variant: variant.to_string(),
                });
            }
        }

        tracing::debug!(
            case = %name,
            operation = %case.operation(),
            fixture_len = case.fixture_len(),
            variants = seen.len(),
            "registered case"
        );
        self.index.insert(name, self.cases.len());
        self.cases.push(case);
        Ok(())
    }

    /// Number of registered cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no case is registered
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Case names in registration order
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|c| c.name())
    }

    /// Look up a case by name
    pub fn case(&self, name: &str) -> Result<&dyn Benchmark, RegistryError> {
        self.index
            .get(name)
            .and_then(|&i| self.cases.get(i))
            .map(|c| c.as_ref())
            .ok_or_else(|| RegistryError::UnknownCase(name.to_string()))
    }

    /// Run a case's variants, or only the selected ones
    ///
    /// Results follow variant registration order whatever the selection
    /// order; repeated names in the selection collapse into one entry.
    pub fn run(
        &self,
        case_name: &str,
        selection: Option<&[&str]>,
    ) -> Result<CaseResults, RegistryError> {
        let case = self.case(case_name)?;
        let indices = resolve_selection(case, selection)?;
        Ok(self.run_indices(case, &indices))
    }

    /// Run every case in registration order
    pub fn compare_all(&self) -> SuiteResults {
        self.cases
            .iter()
            .map(|case| {
                let all: Vec<usize> = (0..case.variants().len()).collect();
                self.run_indices(case.as_ref(), &all)
            })
            .collect()
    }

    /// Check that every variant of a case produces an equivalent output
    pub fn verify(&self, case_name: &str) -> Result<(), VerifyError> {
        let case = self.case(case_name)?;
        let outcome = case.verify();
        if outcome.is_ok() {
            tracing::debug!(case = case_name, "variants agree");
        }
        outcome
    }

    /// Verify every case in registration order
    pub fn verify_all(&self) -> Vec<(String, Result<(), VerifyError>)> {
        self.cases
            .iter()
            .map(|case| (case.name().to_string(), case.verify()))
            .collect()
    }

    fn run_indices(&self, case: &dyn Benchmark, indices: &[usize]) -> CaseResults {
        let variants = case.variants();
        tracing::info!(
            case = case.name(),
            operation = %case.operation(),
            variants = indices.len(),
            "running case"
        );

        let mut results = Vec::with_capacity(indices.len());
        for &index in indices {
            let Some(&(name, strategy)) = variants.get(index) else {
                continue;
            };

            if self.cancellation.is_cancelled() {
                tracing::debug!(case = case.name(), variant = name, "skipped after cancellation");
                results.push(VariantResult::cancelled(name, strategy));
                continue;
            }

            let Some(result) = case.measure(index, &self.settings) else {
                continue;
            };
            match &result.outcome {
                Ok(output) => tracing::debug!(
                    case = case.name(),
                    variant = name,
                    elapsed_ns = result.elapsed.as_nanos() as u64,
                    samples = result.samples.len(),
                    elements = output.elements,
                    "variant finished"
                ),
                Err(error) => tracing::warn!(
                    case = case.name(),
                    variant = name,
                    %error,
                    "variant failed"
                ),
            }
            results.push(result);
        }

        CaseResults {
            case: case.name().to_string(),
            operation: case.operation(),
            fixture_len: case.fixture_len(),
            variants: results,
        }
    }
}

fn resolve_selection(
    case: &dyn Benchmark,
    selection: Option<&[&str]>,
) -> Result<Vec<usize>, RegistryError> {
    let variants = case.variants();
    let Some(selection) = selection else {
        return Ok((0..variants.len()).collect());
    };

    let mut indices = Vec::with_capacity(selection.len());
    for &wanted in selection {
        let position = variants
            .iter()
            .position(|(name, _)| *name == wanted)
            .ok_or_else(|| RegistryError::UnknownVariant {
                case: case.name().to_string(),
                variant: wanted.to_string(),
            })?;
        indices.push(position);
    }
    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Case, Operation, Strategy};
    use crate::error::VariantError;

    fn settings() -> RunSettings {
        RunSettings {
            samples: 2,
            timeout: None,
        }
    }

    fn sum_case(name: &str) -> Case<i64, i64> {
        Case::new(name, Operation::Reduce, vec![1, 2, 3, 4])
            .indexed(|xs| {
                let mut total = 0;
                for i in 0..xs.len() {
                    total += xs[i];
                }
                Ok(total)
            })
            .iterator(|xs| {
                let mut total = 0;
                for x in xs {
                    total += x;
                }
                Ok(total)
            })
            .declarative(|xs| Ok(xs.iter().sum()))
    }

    #[test]
    fn test_duplicate_case_rejected() {
        let mut runner = Runner::with_settings(settings());
        runner.register(sum_case("sum")).unwrap();
        assert_eq!(
            runner.register(sum_case("sum")),
            Err(RegistryError::DuplicateCase("sum".to_string()))
        );
        assert_eq!(runner.len(), 1);
    }

    #[test]
    fn test_duplicate_variant_rejected() {
        let mut runner = Runner::new();
        let case = sum_case("sum").variant("declarative", Strategy::Custom, |xs| {
            Ok(xs.iter().sum())
        });
        assert!(matches!(
            runner.register(case),
            Err(RegistryError::DuplicateVariant { .. })
        ));
        assert!(runner.is_empty());
    }

    #[test]
    fn test_unknown_case_and_variant() {
        let mut runner = Runner::with_settings(settings());
        runner.register(sum_case("sum")).unwrap();

        assert_eq!(
            runner.run("missing", None).unwrap_err(),
            RegistryError::UnknownCase("missing".to_string())
        );
        assert_eq!(
            runner.run("sum", Some(&["nope"])).unwrap_err(),
            RegistryError::UnknownVariant {
                case: "sum".to_string(),
                variant: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_selection_follows_registration_order() {
        let mut runner = Runner::with_settings(settings());
        runner.register(sum_case("sum")).unwrap();

        let results = runner
            .run("sum", Some(&["declarative", "indexed_loop", "declarative"]))
            .unwrap();
        assert_eq!(results.variant_names(), ["indexed_loop", "declarative"]);
    }

    #[test]
    fn test_failing_variant_is_isolated() {
        let mut runner = Runner::with_settings(settings());
        let case = sum_case("sum").variant("broken", Strategy::Custom, |_| {
            Err(VariantError::execution("nope"))
        });
        runner.register(case).unwrap();

        let results = runner.run("sum", None).unwrap();
        assert_eq!(results.variants.len(), 4);
        assert_eq!(results.failures().count(), 1);
        assert!(results.get("declarative").unwrap().is_success());
    }

    #[test]
    fn test_cancellation_between_variants() {
        let mut runner = Runner::with_settings(RunSettings {
            samples: 1,
            timeout: None,
        });
        let token = runner.cancellation_token();
        let trigger = token.clone();
        let case = Case::new("cancel", Operation::Reduce, vec![1_i64])
            .variant("first", Strategy::Custom, move |xs| {
                // Cancelling mid-variant does not interrupt it
                trigger.cancel();
                Ok(xs.len())
            })
            .variant("second", Strategy::Custom, |xs| Ok(xs.len()));
        runner.register(case).unwrap();

        let results = runner.run("cancel", None).unwrap();
        assert!(results.get("first").unwrap().is_success());
        assert_eq!(
            results.get("second").unwrap().error(),
            Some(&VariantError::Cancelled)
        );

        token.reset();
        let rerun = runner.run("cancel", Some(&["second"])).unwrap();
        assert!(rerun.variants[0].is_success());
    }

    #[test]
    fn test_compare_all_in_registration_order() {
        let mut runner = Runner::with_settings(settings());
        runner.register(sum_case("zeta")).unwrap();
        runner.register(sum_case("alpha")).unwrap();

        let suite = runner.compare_all();
        assert_eq!(suite.case_names(), ["zeta", "alpha"]);
        assert_eq!(
            runner.case_names().collect::<Vec<_>>(),
            ["zeta", "alpha"]
        );
        assert_eq!(suite.get("alpha").unwrap().variants.len(), 3);
    }

    #[test]
    fn test_verify_unknown_case() {
        let runner = Runner::new();
        assert!(matches!(
            runner.verify("missing"),
            Err(VerifyError::Registry(RegistryError::UnknownCase(_)))
        ));
    }
}
