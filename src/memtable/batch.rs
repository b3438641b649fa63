//! MemTable write batch

use bytes::Bytes;

use crate::store::{StoreError, StoreResult, WriteBatch};

use super::MemTable;

/// Buffered writes applied to a [`MemTable`] under the writer lock on flush
pub struct MemWriteBatch<'a> {
    table: &'a MemTable,
    pending: Vec<(Vec<u8>, Bytes)>,
    finished: bool,
}

impl<'a> MemWriteBatch<'a> {
    pub(crate) fn new(table: &'a MemTable) -> Self {
        Self {
            table,
            pending: Vec::new(),
            finished: false,
        }
    }

    /// Number of staged writes
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl WriteBatch for MemWriteBatch<'_> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        if self.finished {
            return Err(StoreError::BatchFinished);
        }
        self.pending
            .push((key.to_vec(), Bytes::copy_from_slice(value)));
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        if self.finished {
            return Err(StoreError::BatchFinished);
        }
        self.finished = true;
        if self.is_empty() {
            return Ok(());
        }

        let _writer = self.table.lock_writer();
        self.table
            .apply(self.pending.drain(..).map(|(key, value)| (key, Some(value))));
        Ok(())
    }

    fn cancel(&mut self) {
        self.pending.clear();
        self.finished = true;
    }
}
