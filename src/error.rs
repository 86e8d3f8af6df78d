//! Errors reported when a [`Cursor`][crate::Cursor] cannot be read or moved.

use thiserror::Error;

/// Why a [`Cursor`][crate::Cursor] operation failed. Neither variant changes the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// The cursor is the past-the-end sentinel, so there is no key to read and nowhere to advance.
    #[error("cursor is past the end of the tree")]
    PastTheEnd,
    /// The node the cursor pointed at has been erased from the tree.
    #[error("cursor refers to a node that has been erased")]
    Stale,
}

/// Shorthand for results of cursor operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
