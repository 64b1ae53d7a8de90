//! Case Executor
//!
//! Runs planned cases and turns their results into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Runner (registered cases)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Run cases, collect samples and outputs
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Compute summary stats (parallel)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Build Report with ratios to the first variant
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │verification │  Output equivalence per case
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```

mod execution;
mod formatting;
mod metadata;
mod report;
mod statistics;
mod verification;

pub use execution::{ExecutionConfig, Executor};
pub use formatting::format_human_output;
pub use report::build_report;
pub use statistics::compute_statistics;
pub use verification::execute_verifications;
