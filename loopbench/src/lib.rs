#![warn(missing_docs)]
//! # Loopbench
//!
//! Microbenchmarks that compare three ways of writing the same collection
//! transformation: an explicit indexed loop, a plain iterator loop, and a
//! declarative iterator chain.
//!
//! Loopbench provides:
//! - **Case registry**: named cases over a shared fixture, each with ordered variants
//! - **Failure isolation**: a variant that errors or panics is recorded, the rest still run
//! - **Equivalence checks**: every variant is compared against the first one
//! - **Timing**: repeated samples summarized by median, percentiles and spread
//! - **Standard suite**: map, filter, reduce, group-by, slice and flatten workloads
//! - **Reports**: terminal, JSON and markdown output
//!
//! ## Quick Start
//!
//! ```ignore
//! use loopbench::prelude::*;
//!
//! let mut runner = Runner::new();
//! runner.register(
//!     Case::new("double", Operation::Map, vec![1_i64, 2, 3])
//!         .indexed(|xs| {
//!             let mut out = Vec::with_capacity(xs.len());
//!             for i in 0..xs.len() {
//!                 out.push(xs[i] * 2);
//!             }
//!             Ok(out)
//!         })
//!         .iterator(|xs| Ok(xs.iter().map(|x| x * 2).collect::<Vec<_>>())),
//! )?;
//!
//! runner.verify("double")?;
//! let results = runner.run("double", None)?;
//! ```
//!
//! ## Command Line
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     loopbench::run()
//! }
//! ```

// Re-export core types
pub use loopbench_core::{
    Benchmark, CancellationToken, Case, CaseResults, Equivalence, Fixture, Groups, Operation,
    Output, OutputSummary, RegistryError, RunSettings, Runner, Strategy, SuiteResults, Timer,
    Variant, VariantError, VariantFn, VariantResult, VerifyError, measure_variant,
};

// Re-export stats
pub use loopbench_stats::{
    DEFAULT_SAMPLE_COUNT, Percentiles, SummaryStatistics, compute_percentile, compute_summary,
    summarize_durations,
};

// Re-export the standard suite
pub use loopbench_workloads::{
    DEFAULT_SEED, DEFAULT_SIZE, FixtureBuilder, Page, Person, SliceParams, SuiteConfig,
    register_standard_suite, standard_cases,
};

// Re-export reporting
pub use loopbench_report::{
    OutputFormat, Report, generate_json_report, generate_markdown_report, parse_json_report,
};

/// Workload modules of the standard suite
pub mod workloads {
    pub use loopbench_workloads::{filter, fixtures, flatten, group, map, reduce, slice};
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Case, Groups, Operation, Output, RegistryError, RunSettings, Runner, Strategy,
        VariantError, VerifyError,
    };
}

/// Run the Loopbench CLI harness with the standard suite.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     loopbench::run()
/// }
/// ```
pub use loopbench_cli::run;

pub use loopbench_cli::{Cli, Commands, LoopbenchConfig, run_with, run_with_cli};
