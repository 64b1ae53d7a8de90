#![warn(missing_docs)]
//! Loopbench Workloads
//!
//! Seeded fixtures and the standard comparison suite. Every case carries an
//! `indexed_loop`, an `iterator_loop` and a `declarative` variant of the same
//! transformation, covering map, filter, reduce, group-by, slice and flatten.

pub mod filter;
pub mod fixtures;
pub mod flatten;
pub mod group;
pub mod map;
pub mod reduce;
pub mod slice;

pub use fixtures::{FixtureBuilder, Person};
pub use slice::{Page, SliceParams};

use loopbench_core::{Benchmark, RegistryError, Runner};
use rayon::prelude::*;

/// Default fixture length
pub const DEFAULT_SIZE: usize = 100_000;

/// Default fixture seed
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of the standard suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Elements per fixture
    pub size: usize,
    /// Seed for the random fixtures
    pub seed: u64,
    /// Window used by `slice_skip_take`
    pub slice: SliceParams,
    /// Page used by `slice_paginate`
    pub page: Page,
    /// Longest inner list in `flatten_nested`
    pub max_inner: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: DEFAULT_SEED,
            slice: SliceParams::new(1_000, 10_000),
            page: Page::new(3, 250),
            max_inner: 16,
        }
    }
}

impl SuiteConfig {
    /// Default parameters with a different fixture length
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Fixture builder for these parameters
    pub fn fixtures(&self) -> FixtureBuilder {
        FixtureBuilder::new(self.size, self.seed)
    }
}

type CaseBuilder = fn(&SuiteConfig) -> Box<dyn Benchmark>;

fn boxed<B: Benchmark + 'static>(case: B) -> Box<dyn Benchmark> {
    Box::new(case)
}

const STANDARD_CASES: &[CaseBuilder] = &[
    |c| boxed(map::numeric(c)),
    |c| boxed(map::string(c)),
    |c| boxed(map::object_create(c)),
    |c| boxed(map::object_update(c)),
    |c| boxed(filter::cheap(c)),
    |c| boxed(filter::expensive(c)),
    |c| boxed(filter::string(c)),
    |c| boxed(filter::object(c)),
    |c| boxed(reduce::sum(c)),
    |c| boxed(reduce::label_length(c)),
    |c| boxed(group::parity(c)),
    |c| boxed(group::label_digit(c)),
    |c| boxed(slice::skip_take(c)),
    |c| boxed(slice::paginate(c)),
    |c| boxed(flatten::nested(c)),
];

/// Build every standard case
///
/// Fixtures are generated in parallel; the returned cases keep the fixed
/// suite order.
pub fn standard_cases(config: &SuiteConfig) -> Vec<Box<dyn Benchmark>> {
    STANDARD_CASES.par_iter().map(|build| build(config)).collect()
}

/// Build the standard suite and register it on a runner
pub fn register_standard_suite(
    runner: &mut Runner,
    config: &SuiteConfig,
) -> Result<(), RegistryError> {
    let cases = standard_cases(config);
    let count = cases.len();
    for case in cases {
        runner.register_boxed(case)?;
    }
    tracing::info!(
        cases = count,
        size = config.size,
        seed = config.seed,
        "registered standard suite"
    );
    Ok(())
}
