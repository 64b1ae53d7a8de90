//! Error taxonomy
//!
//! Registration errors are programmer errors returned straight to the caller.
//! Variant errors are captured inside the failing variant's result entry and
//! never abort siblings. Verification errors only come out of `verify`.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while registering or addressing cases and variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A case with this name is already registered
    #[error("case '{0}' is already registered")]
    DuplicateCase(String),

    /// No case with this name is registered
    #[error("unknown case: {0}")]
    UnknownCase(String),

    /// The case has no variant with this name
    #[error("case '{case}' has no variant named '{variant}'")]
    UnknownVariant {
        /// Case that was addressed
        case: String,
        /// Variant name that was not found
        variant: String,
    },

    /// The case declares two variants under one name
    #[error("case '{case}' declares variant '{variant}' more than once")]
    DuplicateVariant {
        /// Offending case
        case: String,
        /// Repeated variant name
        variant: String,
    },
}

/// Failure of a single variant execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// The computation itself faulted (returned error, failed key extraction, panic)
    #[error("variant execution failed: {cause}")]
    Execution {
        /// Description of the underlying fault
        cause: String,
    },

    /// Slice bounds were negative
    #[error("invalid slice bounds: offset {offset}, count {count}")]
    Range {
        /// Requested offset
        offset: i64,
        /// Requested count
        count: i64,
    },

    /// A sample exceeded the configured time budget
    #[error("exceeded time budget of {budget:?} (sample took {elapsed:?})")]
    Timeout {
        /// Configured budget
        budget: Duration,
        /// Duration of the offending sample
        elapsed: Duration,
    },

    /// Cancellation was requested before this variant started
    #[error("cancelled before execution")]
    Cancelled,
}

impl VariantError {
    /// Wrap an underlying fault as an execution error
    pub fn execution(cause: impl std::fmt::Display) -> Self {
        VariantError::Execution {
            cause: cause.to_string(),
        }
    }

    /// Short machine-readable kind, used by reports
    pub fn kind(&self) -> &'static str {
        match self {
            VariantError::Execution { .. } => "execution",
            VariantError::Range { .. } => "range",
            VariantError::Timeout { .. } => "timeout",
            VariantError::Cancelled => "cancelled",
        }
    }
}

/// Errors produced by the equivalence check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Case or variant lookup failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Two variants produced different outputs for the same fixture
    #[error("variants '{variant_a}' and '{variant_b}' disagree: {diff}")]
    Mismatch {
        /// Reference variant
        variant_a: String,
        /// Variant that disagreed with the reference
        variant_b: String,
        /// Human-readable description of the first difference
        diff: String,
    },

    /// A variant failed outright, so no output could be compared
    #[error("variant '{variant}' failed during verification: {source}")]
    Variant {
        /// Failing variant
        variant: String,
        /// Underlying failure
        #[source]
        source: VariantError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_parties() {
        let err = VerifyError::Mismatch {
            variant_a: "indexed_loop".to_string(),
            variant_b: "declarative".to_string(),
            diff: "element 0: 1 vs 2".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("indexed_loop"));
        assert!(msg.contains("declarative"));
    }

    #[test]
    fn test_registry_error_converts() {
        let err: VerifyError = RegistryError::UnknownCase("nope".to_string()).into();
        assert_eq!(err.to_string(), "unknown case: nope");
    }

    #[test]
    fn test_kind() {
        assert_eq!(VariantError::execution("boom").kind(), "execution");
        assert_eq!(VariantError::Cancelled.kind(), "cancelled");
        assert_eq!(
            VariantError::Range {
                offset: -1,
                count: 3
            }
            .kind(),
            "range"
        );
    }
}
