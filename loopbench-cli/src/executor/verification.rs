//! Equivalence Verification
//!
//! Runs every variant of each planned case once and checks their outputs
//! against the first variant, turning the outcome into report entries.
//! Verification stops early when cancellation is requested.

use loopbench_core::{Runner, VerifyError};
use loopbench_report::VerificationEntry;

/// Verify the given cases in order
pub fn execute_verifications(runner: &Runner, cases: &[&str]) -> Vec<VerificationEntry> {
    let token = runner.cancellation_token();
    let mut entries = Vec::with_capacity(cases.len());

    for &case in cases {
        if token.is_cancelled() {
            tracing::debug!(case, "verification skipped after cancellation");
            break;
        }
        entries.push(verification_entry(case, runner.verify(case)));
    }
    entries
}

fn verification_entry(case: &str, outcome: Result<(), VerifyError>) -> VerificationEntry {
    match outcome {
        Ok(()) => VerificationEntry {
            case: case.to_string(),
            passed: true,
            message: "all variants equivalent".to_string(),
        },
        Err(e) => VerificationEntry {
            case: case.to_string(),
            passed: false,
            message: e.to_string(),
        },
    }
}
