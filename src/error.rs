//! Error types for SweepKV
//!
//! Every public operation returns [`SweepError`]. Each variant maps onto a
//! coarse [`ErrorKind`] so callers can branch on the classification without
//! matching on messages. The store error that triggered a failure, when there
//! is one, is reachable through [`std::error::Error::source`].

use thiserror::Error;

use crate::store::StoreError;

/// Result type alias using SweepError
pub type Result<T> = std::result::Result<T, SweepError>;

/// Coarse classification of a [`SweepError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The underlying store failed on get/set/delete/iteration
    Store,

    /// A cursor was invalid right after creation: the keyspace is empty
    EmptyStore,

    /// Caller input was malformed; nothing was touched
    InvalidArgument,

    /// A transaction commit or batch flush failed after staging
    Commit,

    /// A point lookup found no value for the key
    NotFound,
}

impl ErrorKind {
    /// Stable short code for the kind, used in messages and by the CLI
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Store => "store_failure",
            ErrorKind::EmptyStore => "empty_database",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Commit => "commit_failure",
            ErrorKind::NotFound => "not_found",
        }
    }
}

/// Unified error type for SweepKV operations
#[derive(Debug, Error)]
pub enum SweepError {
    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("(store_failure) {message}")]
    Store {
        message: String,
        #[source]
        source: Option<StoreError>,
    },

    #[error("(store_failure) IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("(empty_database) {0}")]
    EmptyStore(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("(invalid_argument) {0}")]
    InvalidArgument(String),

    #[error("(not_found) key not found")]
    NotFound,

    // -------------------------------------------------------------------------
    // Commit Errors
    // -------------------------------------------------------------------------
    #[error("(commit_failure) {message}")]
    Commit {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl SweepError {
    /// Store failure caused by `source`
    pub fn store(message: impl Into<String>, source: StoreError) -> Self {
        SweepError::Store {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Commit or flush failure caused by `source`
    pub fn commit(message: impl Into<String>, source: StoreError) -> Self {
        SweepError::Commit {
            message: message.into(),
            source,
        }
    }

    pub fn empty_store() -> Self {
        SweepError::EmptyStore("iterator finished prematurely, empty database?".to_string())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SweepError::InvalidArgument(message.into())
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SweepError::Store { .. } | SweepError::Io(_) => ErrorKind::Store,
            SweepError::EmptyStore(_) => ErrorKind::EmptyStore,
            SweepError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SweepError::NotFound => ErrorKind::NotFound,
            SweepError::Commit { .. } => ErrorKind::Commit,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_empty_store(&self) -> bool {
        self.kind() == ErrorKind::EmptyStore
    }
}
