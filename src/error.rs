//! Error types for builder operations.

use thiserror::Error;

/// Errors signalled by [`StringBuilder`](crate::StringBuilder) operations.
///
/// Every fallible operation validates its arguments before touching the
/// buffer, so an error always means nothing was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// A single index was outside the valid range.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The length the index was checked against.
        len: usize,
    },

    /// A `start..start + count` range did not fit inside the target.
    #[error("range {start}..{start}+{count} is out of bounds for length {len}")]
    RangeOutOfBounds {
        /// First index of the range.
        start: usize,
        /// Number of characters in the range.
        count: usize,
        /// The length the range was checked against.
        len: usize,
    },

    /// A required text argument was empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T, E = BuilderError> = std::result::Result<T, E>;
