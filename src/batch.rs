//! Batch Module
//!
//! Bulk mutations, each applied as one unit:
//! - `write_all` stages every pair in a store write batch and flushes once
//! - `delete_all` stages every deletion in one read-write transaction
//!
//! A batch that was created but not flushed is always cancelled before
//! returning, so a staging failure leaves nothing behind.

use std::ops::{Deref, DerefMut};

use crate::error::{Result, SweepError};
use crate::store::{Store, Transaction, WriteBatch};

/// Cancels the wrapped batch when dropped; a no-op after a flush
struct CancelOnDrop<B: WriteBatch>(B);

impl<B: WriteBatch> Deref for CancelOnDrop<B> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.0
    }
}

impl<B: WriteBatch> DerefMut for CancelOnDrop<B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.0
    }
}

impl<B: WriteBatch> Drop for CancelOnDrop<B> {
    fn drop(&mut self) {
        self.0.cancel();
        tracing::trace!("write batch released");
    }
}

/// Write every `(keys[i], values[i])` pair as one atomic batch
pub(crate) fn write_all<S, K, V>(store: &S, keys: &[K], values: &[V]) -> Result<()>
where
    S: Store,
    K: AsRef<[u8]>,
    V: AsRef<[u8]>,
{
    if keys.len() != values.len() {
        return Err(SweepError::invalid_argument(format!(
            "keys and values have differing lengths ({} keys, {} values)",
            keys.len(),
            values.len()
        )));
    }
    if keys.is_empty() {
        return Ok(());
    }

    let batch = store
        .write_batch()
        .map_err(|e| SweepError::store("failed to create write batch", e))?;
    let mut batch = CancelOnDrop(batch);

    for (key, value) in keys.iter().zip(values) {
        batch
            .set(key.as_ref(), value.as_ref())
            .map_err(|e| SweepError::store("failure during batch writes", e))?;
    }

    batch.flush().map_err(|e| {
        tracing::warn!("failed to flush writes: {}", e);
        SweepError::commit("failed to flush writes", e)
    })?;

    tracing::debug!(written = keys.len(), "write batch flushed");
    Ok(())
}

/// Stage a deletion of every key in `keys` through `txn`
///
/// The caller commits `txn`; a failure here leaves it to be rolled back.
pub(crate) fn delete_all<T, K>(txn: &T, keys: &[K]) -> Result<()>
where
    T: Transaction,
    K: AsRef<[u8]>,
{
    for key in keys {
        txn.delete(key.as_ref())
            .map_err(|e| SweepError::store("failed to delete key", e))?;
    }

    tracing::debug!(deleted = keys.len(), "deletes staged");
    Ok(())
}
