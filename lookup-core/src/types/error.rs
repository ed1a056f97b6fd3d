//! Error types for member evaluation and variant narrowing

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Failure raised while resolving or invoking a single member.
///
/// These never escape a build pass: the builder turns each one into a
/// failure descriptor and moves on to the next member.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemberError {
    #[error("Exception has been thrown by the target of an invocation: {0}")]
    Invocation(String),

    #[error("Parameter count mismatch: expected {expected}, supplied {supplied}")]
    ParameterCount { expected: usize, supplied: usize },

    #[error("Object does not match target type: expected {expected}, got {actual}")]
    TargetType { expected: String, actual: String },

    #[error("{0}")]
    Host(String),

    #[error("Evaluation panicked: {0}")]
    Panicked(String),
}

impl MemberError {
    /// Shorthand for an error thrown by the invoked member itself
    pub fn invocation(message: impl Into<String>) -> Self {
        MemberError::Invocation(message.into())
    }

    /// Shorthand for a generic host API failure
    pub fn host(message: impl Into<String>) -> Self {
        MemberError::Host(message.into())
    }
}

/// Raised when a variant set is narrowed to one value but holds 0 or >1 candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    #[error("Expected exactly one variant, found {count}")]
    NotSingle { count: usize },
}

/// Why a member was reported as unsupported instead of being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The member returns nothing
    NoReturnValue,
    /// The member needs arguments the builder cannot supply
    RequiresParameters(usize),
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::NoReturnValue => write!(f, "Unsupported: no return value"),
            UnsupportedReason::RequiresParameters(1) => {
                write!(f, "Unsupported: requires 1 parameter")
            }
            UnsupportedReason::RequiresParameters(n) => {
                write!(f, "Unsupported: requires {} parameters", n)
            }
        }
    }
}

/// Run host code, converting a panic into `MemberError::Panicked`.
///
/// The process panic hook still runs for a captured panic, so with the
/// default hook its message reaches stderr. Embedders that inspect untrusted
/// members should install their own hook (the `lookup` binary logs panics
/// through `tracing` at debug level).
pub(crate) fn guarded<T, F>(f: F) -> Result<T, MemberError>
where
    F: FnOnce() -> Result<T, MemberError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(MemberError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
