//! Error types for the sort contract.

use std::collections::TryReserveError;

/// Result alias used by every fallible entry point.
pub type Result<T> = std::result::Result<T, SortError>;

/// Reasons a sort call can fail.
///
/// A failed call never touches the caller's collection: every check and
/// allocation happens before the first element is moved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SortError {
    /// The element count does not fit the index field of a packed key.
    #[error("{len} elements exceed the supported maximum of {max}")]
    UnsupportedSize {
        /// Number of elements passed in.
        len: usize,
        /// Largest supported element count.
        max: usize,
    },

    /// Scratch storage for the call could not be obtained.
    #[error("failed to allocate sort scratch storage")]
    AllocationFailure(#[from] TryReserveError),
}
