//! Tests for failure classification and atomicity under store faults
//!
//! A `FaultyStore` wraps the in-memory store and fails on demand:
//! - setting or deleting one poisoned key
//! - committing a read-write transaction
//! - flushing a write batch
//! - positioning an iterator
//!
//! These tests verify that staging failures surface as `Store`, commit
//! failures as `Commit`, and that no failure leaves a partial mutation.

use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use sweepkv::memtable::{MemTable, MemTransaction, MemWriteBatch};
use sweepkv::store::StoreResult;
use sweepkv::{Engine, ErrorKind, KeyValue, Store, StoreError, Transaction, WriteBatch};

// =============================================================================
// Fault Injection
// =============================================================================

#[derive(Default)]
struct Faults {
    poisoned_key: Option<Vec<u8>>,
    fail_commit: bool,
    fail_flush: bool,
    fail_seek: bool,
}

struct FaultyStore {
    inner: MemTable,
    faults: Faults,
    cancelled: AtomicUsize,
}

impl FaultyStore {
    fn new(faults: Faults) -> Self {
        Self {
            inner: MemTable::new(),
            faults,
            cancelled: AtomicUsize::new(0),
        }
    }

    fn check_key(&self, key: &[u8]) -> StoreResult<()> {
        match &self.faults.poisoned_key {
            Some(poisoned) if poisoned.as_slice() == key => {
                Err(StoreError::Backend("injected key fault".to_string()))
            }
            _ => Ok(()),
        }
    }
}

struct FaultyTransaction<'a> {
    inner: MemTransaction<'a>,
    store: &'a FaultyStore,
}

struct FaultyBatch<'a> {
    inner: MemWriteBatch<'a>,
    store: &'a FaultyStore,
}

impl Store for FaultyStore {
    type Transaction<'a> = FaultyTransaction<'a>;
    type Batch<'a> = FaultyBatch<'a>;

    fn begin_read(&self) -> StoreResult<FaultyTransaction<'_>> {
        Ok(FaultyTransaction {
            inner: self.inner.begin_read()?,
            store: self,
        })
    }

    fn begin_write(&self) -> StoreResult<FaultyTransaction<'_>> {
        Ok(FaultyTransaction {
            inner: self.inner.begin_write()?,
            store: self,
        })
    }

    fn write_batch(&self) -> StoreResult<FaultyBatch<'_>> {
        Ok(FaultyBatch {
            inner: self.inner.write_batch()?,
            store: self,
        })
    }
}

impl Transaction for FaultyTransaction<'_> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.store.check_key(key)?;
        self.inner.set(key, value)
    }

    fn delete(&self, key: &[u8]) -> StoreResult<()> {
        self.store.check_key(key)?;
        self.inner.delete(key)
    }

    fn seek(&self, from: Bound<&[u8]>) -> StoreResult<Option<KeyValue>> {
        if self.store.faults.fail_seek {
            return Err(StoreError::Backend("injected seek fault".to_string()));
        }
        self.inner.seek(from)
    }

    fn is_empty(&self) -> StoreResult<bool> {
        self.inner.is_empty()
    }

    fn commit(self) -> StoreResult<()> {
        if self.store.faults.fail_commit && !self.inner.is_read_only() {
            self.inner.rollback()?;
            return Err(StoreError::Backend("injected commit fault".to_string()));
        }
        self.inner.commit()
    }

    fn rollback(self) -> StoreResult<()> {
        self.inner.rollback()
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }
}

impl WriteBatch for FaultyBatch<'_> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.store.check_key(key)?;
        self.inner.set(key, value)
    }

    fn flush(&mut self) -> StoreResult<()> {
        if self.store.faults.fail_flush {
            return Err(StoreError::Backend("injected flush fault".to_string()));
        }
        self.inner.flush()
    }

    fn cancel(&mut self) {
        self.store.cancelled.fetch_add(1, Ordering::SeqCst);
        self.inner.cancel();
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Seed a store through a fault-free table, then hand it to the engine
fn seeded(faults: Faults) -> Engine<FaultyStore> {
    let store = FaultyStore::new(faults);
    {
        let txn = store.inner.begin_write().unwrap();
        for (key, value) in [("p:1", "a"), ("p:2", "b"), ("p:3", "c"), ("q", "d")] {
            txn.set(key.as_bytes(), value.as_bytes()).unwrap();
        }
        txn.commit().unwrap();
    }
    Engine::with_store(store)
}

fn poisoned(key: &str) -> Faults {
    Faults {
        poisoned_key: Some(key.as_bytes().to_vec()),
        ..Faults::default()
    }
}

// =============================================================================
// write_all Tests
// =============================================================================

#[test]
fn test_write_all_staging_failure_applies_nothing() {
    let engine = seeded(poisoned("bad"));

    let err = engine
        .write_all(&["new1", "bad", "new2"], &["1", "2", "3"])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(engine.read(b"new1").unwrap_err().is_not_found());
    assert!(engine.read(b"new2").unwrap_err().is_not_found());
    assert_eq!(engine.store().inner.entry_count(), 4);
    assert_eq!(engine.store().cancelled.load(Ordering::SeqCst), 1);
}

#[test]
fn test_write_all_flush_failure_is_commit_failure() {
    let engine = seeded(Faults {
        fail_flush: true,
        ..Faults::default()
    });

    let err = engine.write_all(&["x", "y"], &["1", "2"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Commit);
    assert!(err.to_string().contains("failed to flush writes"));
    assert!(engine.read(b"x").unwrap_err().is_not_found());
    // The unflushed batch is still released
    assert_eq!(engine.store().cancelled.load(Ordering::SeqCst), 1);
}

#[test]
fn test_write_all_mismatch_never_opens_a_batch() {
    let engine = seeded(Faults::default());

    let err = engine.write_all(&["x"], &["1", "2"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(engine.store().cancelled.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Single-Key Tests
// =============================================================================

#[test]
fn test_write_set_failure_is_store_failure() {
    let engine = seeded(poisoned("bad"));

    let err = engine.write(b"bad", b"v").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);
}

#[test]
fn test_write_commit_failure_is_commit_failure() {
    let engine = seeded(Faults {
        fail_commit: true,
        ..Faults::default()
    });

    let err = engine.write(b"p:1", b"changed").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Commit);
    assert!(err.to_string().contains("failed to commit writes"));

    let err = engine.delete(b"p:1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Commit);

    assert_eq!(engine.read(b"p:1").unwrap(), b"a".to_vec());
}

#[test]
fn test_point_read_never_positions_an_iterator() {
    let engine = seeded(Faults {
        fail_seek: true,
        ..Faults::default()
    });

    // Emptiness is checked without copying out the first entry
    assert_eq!(engine.read(b"q").unwrap(), b"d".to_vec());
    assert!(engine.read(b"missing").unwrap_err().is_not_found());

    // Iterating operations do surface the fault
    assert_eq!(engine.scan(b"p:").unwrap_err().kind(), ErrorKind::Store);
}

#[test]
fn test_reads_unaffected_by_commit_faults() {
    let engine = seeded(Faults {
        fail_commit: true,
        ..Faults::default()
    });

    assert_eq!(engine.read(b"q").unwrap(), b"d".to_vec());
    assert_eq!(engine.scan(b"p:").unwrap().len(), 3);
}

// =============================================================================
// delete_all / delete_scan Tests
// =============================================================================

#[test]
fn test_delete_all_failure_deletes_nothing() {
    let engine = seeded(poisoned("p:2"));

    let err = engine.delete_all(&["p:1", "p:2", "p:3"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert_eq!(engine.store().inner.entry_count(), 4);
    assert_eq!(engine.read(b"p:1").unwrap(), b"a".to_vec());
}

#[test]
fn test_delete_all_commit_failure() {
    let engine = seeded(Faults {
        fail_commit: true,
        ..Faults::default()
    });

    let err = engine.delete_all(&["p:1", "q"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Commit);
    assert!(err.to_string().contains("failed to commit deletes"));
    assert_eq!(engine.store().inner.entry_count(), 4);
}

#[test]
fn test_delete_scan_failure_midway_deletes_nothing() {
    let engine = seeded(poisoned("p:3"));

    let err = engine.delete_scan(b"p:").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert_eq!(
        engine.scan(b"p:").unwrap(),
        vec![b"p:1".to_vec(), b"p:2".to_vec(), b"p:3".to_vec()]
    );
}

#[test]
fn test_delete_scan_commit_failure() {
    let engine = seeded(Faults {
        fail_commit: true,
        ..Faults::default()
    });

    let err = engine.delete_scan(b"p:").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Commit);
    assert_eq!(engine.scan(b"p:").unwrap().len(), 3);
}
