//! Store error types.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors reported by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The redb database reported an error.
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mutation was attempted on a read snapshot.
    #[error("transaction is read-only")]
    ReadOnly,

    /// The write batch was already flushed or cancelled.
    #[error("write batch already finished")]
    BatchFinished,

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Wrap any specific redb error type.
    pub fn redb(err: impl Into<redb::Error>) -> Self {
        StoreError::Redb(err.into())
    }
}
