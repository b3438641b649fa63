//! Redb write batch
//!
//! Stages sets in a dedicated write transaction. Flushing commits it;
//! cancelling (or dropping) aborts it, so nothing staged becomes visible.

use redb::WriteTransaction;

use crate::store::{StoreError, StoreResult, WriteBatch};

use super::DATA_TABLE;

/// A batch of writes committed to redb as one transaction
pub struct RedbWriteBatch {
    /// `None` once flushed or cancelled
    txn: Option<WriteTransaction>,
    staged: usize,
}

impl RedbWriteBatch {
    pub(crate) fn new(txn: WriteTransaction) -> Self {
        Self {
            txn: Some(txn),
            staged: 0,
        }
    }

    /// Number of staged writes
    pub fn len(&self) -> usize {
        self.staged
    }

    pub fn is_empty(&self) -> bool {
        self.staged == 0
    }
}

impl WriteBatch for RedbWriteBatch {
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let txn = self.txn.as_ref().ok_or(StoreError::BatchFinished)?;
        let mut table = txn.open_table(DATA_TABLE).map_err(StoreError::redb)?;
        table.insert(key, value).map_err(StoreError::redb)?;
        self.staged += 1;
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        let txn = self.txn.take().ok_or(StoreError::BatchFinished)?;
        tracing::trace!(staged = self.len(), "committing write batch");
        txn.commit().map_err(StoreError::redb)
    }

    fn cancel(&mut self) {
        if let Some(txn) = self.txn.take() {
            if let Err(e) = txn.abort() {
                tracing::warn!("failed to abort write batch: {}", e);
            }
        }
    }
}
