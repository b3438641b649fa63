//! Store Module
//!
//! The interface the access layer needs from an ordered key-value store.
//!
//! ## Responsibilities
//! - Read snapshots and read-write transactions
//! - Forward iteration seekable to any key (see [`Cursor`])
//! - Single-key set/delete plus commit
//! - An independent batched-write accumulator (set, flush, cancel)
//!
//! Concrete stores live in [`crate::storage`] (redb, on disk) and
//! [`crate::memtable`] (in memory).

mod cursor;
mod error;
mod traits;

pub use cursor::Cursor;
pub use error::{StoreError, StoreResult};
pub use traits::{Store, Transaction, WriteBatch};

/// A key and its value, both owned
pub type KeyValue = (Vec<u8>, Vec<u8>);
