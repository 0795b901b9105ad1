//! Error types for the ring cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the ring cache.
///
/// The rendered messages are part of the public contract; callers may match
/// on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A constructor argument failed validation
    #[error("Bad argument #{position} to {operation} ({expected} expected, got '{actual}')")]
    InvalidArgument {
        position: usize,
        operation: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// A store entry has neither a collectable key nor a collectable value
    #[error("Uncollectable cache entry {{{key}, {value}}}")]
    UncollectableEntry { key: String, value: String },

    /// No library registered under the requested major name
    #[error("Cannot find a library instance of {0:?}")]
    LibraryNotFound(String),
}

impl CacheError {
    /// Builds an [`CacheError::InvalidArgument`] for argument `position` of `operation`.
    pub fn invalid_argument(
        position: usize,
        operation: &'static str,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        CacheError::InvalidArgument {
            position,
            operation,
            expected,
            actual: actual.into(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the ring cache.
pub type Result<T> = std::result::Result<T, CacheError>;
