#![warn(missing_docs)]
//! Loopbench Core - Case Registry and Runner
//!
//! This crate holds everything needed to compare alternative implementations
//! of one transformation over one dataset:
//! - `Case`/`Variant`/`Fixture` for describing a comparison
//! - `Runner` for registering, running and verifying cases
//! - Monotonic timing with repeated samples per variant
//! - Cooperative cancellation between variants
//!
//! Variants never run concurrently; a failure in one variant is recorded in
//! its own result entry and the run moves on.

mod cancel;
mod case;
mod error;
mod measure;
mod output;
mod result;
mod runner;

pub use cancel::CancellationToken;
pub use case::{Benchmark, Case, Equivalence, Fixture, Operation, Strategy, Variant, VariantFn};
pub use error::{RegistryError, VariantError, VerifyError};
pub use measure::{Timer, measure_variant};
pub use output::{Groups, Output, OutputSummary};
pub use result::{CaseResults, SuiteResults, VariantResult};
pub use runner::{RunSettings, Runner};
