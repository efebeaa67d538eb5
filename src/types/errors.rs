//! Error types raised while a policy is being applied.
//!
//! Configuring a policy never fails; these are the distinguished failures a
//! comparator reports when the policy's switches and rules say so.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquivalencyError {
    #[error("cyclic reference detected at {path}")]
    CyclicReference { path: String },
    #[error("maximum recursion depth of {max_depth} was reached at {path}")]
    RecursionLimit { path: String, max_depth: usize },
    #[error("expectation has member {path} that the subject does not have")]
    MissingMember { path: String },
    #[error("{path}: {message}")]
    Mismatch { path: String, message: String },
}

impl EquivalencyError {
    /// Path of the member the failure was reported for.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            EquivalencyError::CyclicReference { path }
            | EquivalencyError::RecursionLimit { path, .. }
            | EquivalencyError::MissingMember { path }
            | EquivalencyError::Mismatch { path, .. } => path,
        }
    }
}

/// Convenient alias for results returning an `EquivalencyError`.
pub type Result<T> = std::result::Result<T, EquivalencyError>;
