//! MemTable implementation
//!
//! BTreeMap-based store with copy-on-write snapshots.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::store::{KeyValue, Store, StoreError, StoreResult, Transaction};

use super::MemWriteBatch;

pub(crate) type Entries = BTreeMap<Vec<u8>, Bytes>;

/// In-memory ordered key-value store
///
/// ## Concurrency:
/// - `data`: the committed keyspace; readers clone the `Arc` and never block
///   on writers
/// - `writer`: serializes write transactions and batch flushes
pub struct MemTable {
    data: RwLock<Arc<Entries>>,
    writer: Mutex<()>,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Arc::new(BTreeMap::new())),
            writer: Mutex::new(()),
        }
    }

    /// Number of committed keys
    pub fn entry_count(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    pub(crate) fn snapshot(&self) -> Arc<Entries> {
        Arc::clone(&self.data.read())
    }

    pub(crate) fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock()
    }

    /// Apply staged changes to the committed keyspace (writer lock held)
    ///
    /// `None` removes the key. The map is copied only while some reader
    /// snapshot still shares it.
    pub(crate) fn apply<I>(&self, changes: I)
    where
        I: IntoIterator<Item = (Vec<u8>, Option<Bytes>)>,
    {
        let mut data = self.data.write();
        let entries = Arc::make_mut(&mut *data);
        for (key, value) in changes {
            match value {
                Some(value) => {
                    entries.insert(key, value);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemTable {
    type Transaction<'a> = MemTransaction<'a>;
    type Batch<'a> = MemWriteBatch<'a>;

    fn begin_read(&self) -> StoreResult<MemTransaction<'_>> {
        Ok(MemTransaction::new(self, self.snapshot(), None))
    }

    fn begin_write(&self) -> StoreResult<MemTransaction<'_>> {
        // Take the writer lock before the snapshot so the view is current
        let writer = self.lock_writer();
        Ok(MemTransaction::new(self, self.snapshot(), Some(writer)))
    }

    fn write_batch(&self) -> StoreResult<MemWriteBatch<'_>> {
        Ok(MemWriteBatch::new(self))
    }
}

/// Uncommitted changes of one write transaction; `None` marks a delete
type Staged = BTreeMap<Vec<u8>, Option<Bytes>>;

/// A MemTable snapshot, or a write transaction holding the writer lock
///
/// Writes go to `staged` and are read back merged over `snapshot`, so the
/// committed map is never copied while the transaction runs.
pub struct MemTransaction<'a> {
    table: &'a MemTable,
    snapshot: Arc<Entries>,
    staged: RefCell<Staged>,
    writer: Option<MutexGuard<'a, ()>>,
}

impl<'a> MemTransaction<'a> {
    fn new(
        table: &'a MemTable,
        snapshot: Arc<Entries>,
        writer: Option<MutexGuard<'a, ()>>,
    ) -> Self {
        Self {
            table,
            snapshot,
            staged: RefCell::new(BTreeMap::new()),
            writer,
        }
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        if self.writer.is_none() {
            return Err(StoreError::ReadOnly);
        }
        Ok(())
    }

    /// Run `f` on the first visible entry at or after `from`
    fn first_visible<R>(
        &self,
        from: Bound<&[u8]>,
        f: impl FnOnce(&[u8], &[u8]) -> R,
    ) -> Option<R> {
        let staged = self.staged.borrow();
        let mut committed = self
            .snapshot
            .range::<[u8], _>((from, Bound::Unbounded))
            .peekable();
        let mut pending = staged.range::<[u8], _>((from, Bound::Unbounded)).peekable();

        loop {
            let order = match (committed.peek(), pending.peek()) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((committed_key, _)), Some((pending_key, _))) => {
                    committed_key.cmp(pending_key)
                }
            };

            if order == Ordering::Less {
                if let Some((key, value)) = committed.next() {
                    return Some(f(key.as_slice(), &value[..]));
                }
            }
            // A staged change shadows the committed entry with the same key
            if order == Ordering::Equal {
                committed.next();
            }
            match pending.next() {
                Some((key, Some(value))) => return Some(f(key.as_slice(), &value[..])),
                // Deleted in this transaction
                _ => continue,
            }
        }
    }
}

impl Transaction for MemTransaction<'_> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        if let Some(change) = self.staged.borrow().get(key) {
            return Ok(change.as_ref().map(|value| value.to_vec()));
        }
        Ok(self.snapshot.get(key).map(|value| value.to_vec()))
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.ensure_writable()?;
        self.staged
            .borrow_mut()
            .insert(key.to_vec(), Some(Bytes::copy_from_slice(value)));
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StoreResult<()> {
        self.ensure_writable()?;
        self.staged.borrow_mut().insert(key.to_vec(), None);
        Ok(())
    }

    fn seek(&self, from: Bound<&[u8]>) -> StoreResult<Option<KeyValue>> {
        Ok(self.first_visible(from, |key, value| (key.to_vec(), value.to_vec())))
    }

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.first_visible(Bound::Unbounded, |_, _| ()).is_none())
    }

    fn commit(self) -> StoreResult<()> {
        let MemTransaction {
            table,
            snapshot,
            staged,
            writer,
        } = self;
        if writer.is_some() {
            // Release our share of the map so applying does not copy it
            drop(snapshot);
            table.apply(staged.into_inner());
        }
        drop(writer);
        Ok(())
    }

    fn rollback(self) -> StoreResult<()> {
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.writer.is_none()
    }
}
