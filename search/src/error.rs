//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal found, frontier exhausted, resource bound hit) are reported through
//! [`crate::status::SearchStatus`] on the returned outcome.

/// Typed failure for pre-flight search validation.
///
/// Returned before any node is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The generator or state generator was built for a different problem
    /// than the one handed to the search.
    MismatchedProblem { expected: String, actual: String },
    /// A policy bound is out of range (for example a zero expansion budget).
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MismatchedProblem { expected, actual } => {
                write!(f, "search components built for problem {actual}, expected {expected}")
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
