//! Errors surfaced by the skiplist.
//!
//! Looking up or deleting a key which is not present is not an error; those
//! operations report absence through `bool` or `Option`.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::level_generator::GeometricError;

/// Errors that can occur when creating or growing a
/// [`SkipList`](crate::SkipList).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "Re-exported at the crate root, where 'Error' would be ambiguous."
)]
#[non_exhaustive]
pub enum SkipListError {
    /// The expected number of elements must be non-zero.
    #[error("expected size must be non-zero.")]
    ZeroExpectedSize,
    /// A level generator must provide at least one level.
    #[error("level generator must provide at least one level.")]
    ZeroLevels,
    /// The level generator could not be configured.
    #[error(transparent)]
    Geometric(#[from] GeometricError),
    /// Memory for a new node could not be reserved.
    #[error("failed to allocate a new node: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl SkipListError {
    /// Returns `true` if the error was caused by an invalid configuration, as
    /// opposed to a failure while inserting.
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SkipListError::ZeroExpectedSize | SkipListError::ZeroLevels | SkipListError::Geometric(_)
        )
    }
}
