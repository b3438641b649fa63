//! Forward cursor over a transaction.
//!
//! The cursor keeps an owned copy of the entry it points at. Moving forward
//! seeks strictly past that key, so the current key may be deleted through
//! the same transaction before advancing.

use std::ops::Bound;

use super::{KeyValue, StoreResult, Transaction};

/// A forward iterator over a transaction's keyspace.
pub struct Cursor<'t, T: Transaction> {
    txn: &'t T,
    current: Option<KeyValue>,
}

impl<'t, T: Transaction> Cursor<'t, T> {
    /// Open a cursor positioned at the first entry.
    ///
    /// The cursor is invalid right away when the keyspace is empty.
    pub fn open(txn: &'t T) -> StoreResult<Self> {
        let current = txn.seek(Bound::Unbounded)?;
        tracing::trace!(valid = current.is_some(), "cursor opened");
        Ok(Self { txn, current })
    }

    /// Move to the first entry at or after `key`.
    pub fn seek(&mut self, key: &[u8]) -> StoreResult<()> {
        self.current = self.txn.seek(Bound::Included(key))?;
        Ok(())
    }

    /// Move to the next entry. Does nothing once the cursor is exhausted.
    pub fn advance(&mut self) -> StoreResult<()> {
        if let Some((key, _)) = self.current.take() {
            self.current = self.txn.seek(Bound::Excluded(key.as_slice()))?;
        }
        Ok(())
    }

    pub fn valid(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the cursor points at a key starting with `prefix`.
    pub fn valid_for_prefix(&self, prefix: &[u8]) -> bool {
        self.key().is_some_and(|key| key.starts_with(prefix))
    }

    pub fn key(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(key, _)| key.as_slice())
    }

    pub fn value(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(_, value)| value.as_slice())
    }

    /// The current entry without advancing.
    pub fn current(&self) -> Option<(&[u8], &[u8])> {
        self.current
            .as_ref()
            .map(|(key, value)| (key.as_slice(), value.as_slice()))
    }
}
