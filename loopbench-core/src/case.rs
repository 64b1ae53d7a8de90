//! Cases, variants and fixtures
//!
//! A [`Case`] owns one immutable [`Fixture`] and an ordered list of
//! [`Variant`]s, all implementing the same logical [`Operation`]. The runner
//! only sees cases through the object-safe [`Benchmark`] trait, so cases with
//! different input and output types share one registry.

use crate::error::{VariantError, VerifyError};
use crate::measure::measure_variant;
use crate::output::Output;
use crate::result::VariantResult;
use crate::runner::RunSettings;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Logical transformation a case implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Element-wise projection
    Map,
    /// Predicate selection
    Filter,
    /// Fold to a single value
    Reduce,
    /// Partition by key
    GroupBy,
    /// Take/skip windows
    Slice,
    /// Concatenate nested sequences
    Flatten,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Map => "map",
            Operation::Filter => "filter",
            Operation::Reduce => "reduce",
            Operation::GroupBy => "group-by",
            Operation::Slice => "slice",
            Operation::Flatten => "flatten",
        };
        f.write_str(name)
    }
}

/// Iteration idiom a variant uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `for i in 0..len` with explicit indexing
    IndexedLoop,
    /// `for item in slice`
    IteratorLoop,
    /// Iterator adapter chain (`map`, `filter`, `fold`, ...)
    Declarative,
    /// Anything else
    Custom,
}

impl Strategy {
    /// Variant name used by the `indexed`/`iterator`/`declarative` builders
    pub fn default_name(self) -> &'static str {
        match self {
            Strategy::IndexedLoop => "indexed_loop",
            Strategy::IteratorLoop => "iterator_loop",
            Strategy::Declarative => "declarative",
            Strategy::Custom => "custom",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Immutable input shared by every variant of a case
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture<T> {
    items: Box<[T]>,
}

impl<T> Fixture<T> {
    /// Freeze a vector into a fixture
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }

    /// Fixture elements
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Deref for Fixture<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for Fixture<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for Fixture<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Boxed variant body: reads the fixture, produces an output
pub type VariantFn<TIn, TOut> =
    Box<dyn Fn(&[TIn]) -> Result<TOut, VariantError> + Send + Sync>;

/// Boxed equality predicate: `None` when equivalent, otherwise a diff description
pub type Equivalence<TOut> = Box<dyn Fn(&TOut, &TOut) -> Option<String> + Send + Sync>;

/// One named implementation of a case's transformation
pub struct Variant<TIn, TOut> {
    name: String,
    strategy: Strategy,
    run: VariantFn<TIn, TOut>,
}

impl<TIn, TOut> Variant<TIn, TOut> {
    /// Create a variant
    pub fn new<F>(name: impl Into<String>, strategy: Strategy, run: F) -> Self
    where
        F: Fn(&[TIn]) -> Result<TOut, VariantError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            strategy,
            run: Box::new(run),
        }
    }

    /// Variant name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iteration idiom
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run once against the fixture, turning a panic into an execution error
    pub fn invoke(&self, fixture: &[TIn]) -> Result<TOut, VariantError> {
        match catch_unwind(AssertUnwindSafe(|| (self.run)(fixture))) {
            Ok(result) => result,
            Err(panic) => Err(VariantError::execution(panic_message(panic.as_ref()))),
        }
    }
}

impl<TIn, TOut> fmt::Debug for Variant<TIn, TOut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

/// A fixture plus the variants that transform it
pub struct Case<TIn, TOut> {
    name: String,
    operation: Operation,
    fixture: Fixture<TIn>,
    variants: Vec<Variant<TIn, TOut>>,
    equivalence: Option<Equivalence<TOut>>,
}

impl<TIn, TOut> Case<TIn, TOut>
where
    TIn: Send + Sync + 'static,
    TOut: Output,
{
    /// Create a case with no variants yet
    pub fn new(
        name: impl Into<String>,
        operation: Operation,
        fixture: impl Into<Fixture<TIn>>,
    ) -> Self {
        Self {
            name: name.into(),
            operation,
            fixture: fixture.into(),
            variants: Vec::new(),
            equivalence: None,
        }
    }

    /// Append a variant; registration order is report order
    pub fn variant<F>(mut self, name: impl Into<String>, strategy: Strategy, run: F) -> Self
    where
        F: Fn(&[TIn]) -> Result<TOut, VariantError> + Send + Sync + 'static,
    {
        self.variants.push(Variant::new(name, strategy, run));
        self
    }

    /// Append the `indexed_loop` variant
    pub fn indexed<F>(self, run: F) -> Self
    where
        F: Fn(&[TIn]) -> Result<TOut, VariantError> + Send + Sync + 'static,
    {
        let strategy = Strategy::IndexedLoop;
        self.variant(strategy.default_name(), strategy, run)
    }

    /// Append the `iterator_loop` variant
    pub fn iterator<F>(self, run: F) -> Self
    where
        F: Fn(&[TIn]) -> Result<TOut, VariantError> + Send + Sync + 'static,
    {
        let strategy = Strategy::IteratorLoop;
        self.variant(strategy.default_name(), strategy, run)
    }

    /// Append the `declarative` variant
    pub fn declarative<F>(self, run: F) -> Self
    where
        F: Fn(&[TIn]) -> Result<TOut, VariantError> + Send + Sync + 'static,
    {
        let strategy = Strategy::Declarative;
        self.variant(strategy.default_name(), strategy, run)
    }

    /// Replace the output type's default equality predicate
    pub fn with_equivalence<F>(mut self, equivalence: F) -> Self
    where
        F: Fn(&TOut, &TOut) -> Option<String> + Send + Sync + 'static,
    {
        self.equivalence = Some(Box::new(equivalence));
        self
    }

    /// Shared input
    pub fn fixture(&self) -> &Fixture<TIn> {
        &self.fixture
    }

    /// Variants in registration order
    pub fn variant_list(&self) -> &[Variant<TIn, TOut>] {
        &self.variants
    }

    fn compare(&self, expected: &TOut, actual: &TOut) -> Option<String> {
        match &self.equivalence {
            Some(equivalence) => equivalence(expected, actual),
            None => expected.diff(actual),
        }
    }
}

/// Type-erased view of a case, as held by the runner
pub trait Benchmark: Send + Sync {
    /// Unique case name
    fn name(&self) -> &str;

    /// Transformation the variants implement
    fn operation(&self) -> Operation;

    /// Number of fixture elements
    fn fixture_len(&self) -> usize;

    /// Variant names and strategies in registration order
    fn variants(&self) -> Vec<(&str, Strategy)>;

    /// Time the variant at `index` against the fixture; `None` when out of range
    fn measure(&self, index: usize, settings: &RunSettings) -> Option<VariantResult>;

    /// Check every variant against the first one
    fn verify(&self) -> Result<(), VerifyError>;
}

impl<TIn, TOut> Benchmark for Case<TIn, TOut>
where
    TIn: Send + Sync + 'static,
    TOut: Output,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn operation(&self) -> Operation {
        self.operation
    }

    fn fixture_len(&self) -> usize {
        self.fixture.len()
    }

    fn variants(&self) -> Vec<(&str, Strategy)> {
        self.variants
            .iter()
            .map(|v| (v.name(), v.strategy()))
            .collect()
    }

    fn measure(&self, index: usize, settings: &RunSettings) -> Option<VariantResult> {
        self.variants
            .get(index)
            .map(|variant| measure_variant(variant, &self.fixture, settings))
    }

    fn verify(&self) -> Result<(), VerifyError> {
        let mut variants = self.variants.iter();
        let Some(reference) = variants.next() else {
            return Ok(());
        };

        let expected =
            reference
                .invoke(&self.fixture)
                .map_err(|source| VerifyError::Variant {
                    variant: reference.name().to_string(),
                    source,
                })?;

        for other in variants {
            let actual = other
                .invoke(&self.fixture)
                .map_err(|source| VerifyError::Variant {
                    variant: other.name().to_string(),
                    source,
                })?;

            if let Some(diff) = self.compare(&expected, &actual) {
                tracing::warn!(
                    case = %self.name,
                    reference = reference.name(),
                    variant = other.name(),
                    %diff,
                    "variant output mismatch"
                );
                return Err(VerifyError::Mismatch {
                    variant_a: reference.name().to_string(),
                    variant_b: other.name().to_string(),
                    diff,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::needless_range_loop)]
    fn doubling_case(fixture: Vec<i64>) -> Case<i64, Vec<i64>> {
        Case::new("double", Operation::Map, fixture)
            .indexed(|xs| {
                let mut out = Vec::with_capacity(xs.len());
                for i in 0..xs.len() {
                    out.push(xs[i] * 2);
                }
                Ok(out)
            })
            .iterator(|xs| {
                let mut out = Vec::with_capacity(xs.len());
                for x in xs {
                    out.push(x * 2);
                }
                Ok(out)
            })
            .declarative(|xs| Ok(xs.iter().map(|x| x * 2).collect()))
    }

    #[test]
    fn test_builders_name_variants_by_strategy() {
        let case = doubling_case(vec![1, 2, 3]);
        let names: Vec<_> = case.variants().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["indexed_loop", "iterator_loop", "declarative"]);
        assert_eq!(case.fixture_len(), 3);
        assert_eq!(case.operation(), Operation::Map);
    }

    #[test]
    fn test_verify_passes_for_equivalent_variants() {
        assert!(doubling_case(vec![1, 2, 3]).verify().is_ok());
        assert!(doubling_case(Vec::new()).verify().is_ok());
    }

    #[test]
    fn test_verify_reports_off_by_one() {
        let case = doubling_case(vec![1, 2, 3]).variant("buggy", Strategy::Custom, |xs| {
            Ok(xs.iter().skip(1).map(|x| x * 2).collect())
        });

        match case.verify() {
            Err(VerifyError::Mismatch {
                variant_a,
                variant_b,
                ..
            }) => {
                assert_eq!(variant_a, "indexed_loop");
                assert_eq!(variant_b, "buggy");
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_reports_failing_variant() {
        let case = doubling_case(vec![1, 2, 3]).variant("broken", Strategy::Custom, |_| {
            Err(VariantError::execution("no output"))
        });

        match case.verify() {
            Err(VerifyError::Variant {
                variant,
                source: VariantError::Execution { cause },
            }) => {
                assert_eq!(variant, "broken");
                assert_eq!(cause, "no output");
            }
            other => panic!("expected variant failure, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_reports_panicking_reference() {
        let case = Case::new("explode", Operation::Map, vec![1_i64])
            .indexed(|_| -> Result<Vec<i64>, VariantError> { panic!("boom") })
            .iterator(|xs| Ok(xs.to_vec()));

        assert!(matches!(
            case.verify(),
            Err(VerifyError::Variant { variant, source: VariantError::Execution { cause } })
                if variant == "indexed_loop" && cause.contains("boom")
        ));
    }

    #[test]
    fn test_measure_out_of_range_is_none() {
        let case = doubling_case(vec![1]);
        let settings = RunSettings {
            samples: 1,
            timeout: None,
        };
        assert!(case.measure(0, &settings).is_some());
        assert!(case.measure(3, &settings).is_none());
    }

    #[test]
    fn test_custom_equivalence_overrides_default() {
        let case = Case::new("sum", Operation::Reduce, vec![1.0_f64, 2.0, 3.0])
            .variant("forward", Strategy::Custom, |xs| Ok(xs.iter().sum::<f64>()))
            .variant("backward", Strategy::Custom, |xs| {
                Ok(xs.iter().rev().sum::<f64>() + 1e-12)
            })
            .with_equivalence(|a: &f64, b: &f64| {
                ((a - b).abs() > 1e-9).then(|| format!("{a} vs {b}"))
            });
        assert!(case.verify().is_ok());
    }

    #[test]
    fn test_invoke_catches_panics() {
        let variant: Variant<i64, i64> =
            Variant::new("explode", Strategy::Custom, |_| panic!("boom"));
        let err = variant.invoke(&[1]).unwrap_err();
        assert_eq!(err, VariantError::execution("panicked: boom"));
    }

    #[test]
    fn test_fixture_is_read_only_view() {
        let fixture: Fixture<i64> = (1..=4).collect();
        assert_eq!(fixture.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(fixture.len(), 4);
        assert!(!fixture.is_empty());
    }
}
