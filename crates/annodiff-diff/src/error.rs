//! Error types for the diff crate.

use std::fmt;

use annodiff_store::StoreError;

/// Errors that can occur during diff operations.
///
/// None of these are transient: the diff is a pure computation, so every
/// error is either bad input (`InputTooLarge`, unresolved annotations) or a
/// bug in a collaborator (`InvariantViolation`).
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Annotation store failure, including unresolved annotation keys.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An input sequence exceeds the configured element limit.
    #[error("{side} sequence has {len} elements, limit is {limit}")]
    InputTooLarge {
        side: &'static str,
        len: usize,
        limit: usize,
    },

    /// A pass broke the round-trip property or split structure unsafely.
    #[error("invariant violated in '{pass}': {reason}")]
    InvariantViolation { pass: String, reason: String },
}

impl DiffError {
    /// Create an invariant violation with a pass name and reason.
    pub fn invariant(pass: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            pass: pass.into(),
            reason: reason.into(),
        }
    }
}

impl PartialEq for DiffError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
