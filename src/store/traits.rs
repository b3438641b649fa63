//! Core store traits.

use std::ops::Bound;

use super::{KeyValue, StoreResult};

/// An ordered key-value store with snapshot transactions.
pub trait Store: Send + Sync {
    /// The transaction type for this store.
    type Transaction<'a>: Transaction
    where
        Self: 'a;

    /// The write batch type for this store.
    type Batch<'a>: WriteBatch
    where
        Self: 'a;

    /// Begin a read-only snapshot.
    fn begin_read(&self) -> StoreResult<Self::Transaction<'_>>;

    /// Begin a read-write transaction.
    fn begin_write(&self) -> StoreResult<Self::Transaction<'_>>;

    /// Create an empty write batch.
    fn write_batch(&self) -> StoreResult<Self::Batch<'_>>;
}

/// A snapshot or read-write transaction.
///
/// Mutations take `&self` so that a [`Cursor`](super::Cursor) borrowing the
/// transaction can stay open while keys are deleted under it.
pub trait Transaction {
    /// Get the value stored under `key`.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Set `key` to `value`.
    fn set(&self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn delete(&self, key: &[u8]) -> StoreResult<()>;

    /// Return a copy of the first entry whose key lies at or after `from`.
    fn seek(&self, from: Bound<&[u8]>) -> StoreResult<Option<KeyValue>>;

    /// Whether the transaction sees no entry at all.
    ///
    /// The default seeks to the first entry; stores that can answer without
    /// copying it should override this.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.seek(Bound::Unbounded)?.is_none())
    }

    /// Commit the transaction.
    fn commit(self) -> StoreResult<()>;

    /// Discard the transaction (implicit on drop for uncommitted transactions).
    fn rollback(self) -> StoreResult<()>;

    /// Whether this is a read-only snapshot.
    fn is_read_only(&self) -> bool;
}

/// A buffered set of pending writes applied atomically on flush.
pub trait WriteBatch {
    /// Stage a set.
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Apply every staged write as one unit.
    fn flush(&mut self) -> StoreResult<()>;

    /// Drop every staged write. A no-op once the batch is finished.
    fn cancel(&mut self);
}
