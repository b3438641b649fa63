//! Engine Module
//!
//! The access layer that wraps every operation in a transaction.
//!
//! ## Responsibilities
//! - Own the store handle (explicit open/close lifecycle)
//! - Run units of work against read snapshots or read-write transactions
//! - Route point, multi-key and prefix operations to their engines
//! - Classify every failure into a [`SweepError`]

use std::fs;
use std::path::Path;

use crate::batch;
use crate::config::Config;
use crate::error::{Result, SweepError};
use crate::multiget;
use crate::scan;
use crate::storage::{RedbOptions, RedbStore};
use crate::store::{Cursor, KeyValue, Store, Transaction};

/// The access engine over an ordered store
///
/// ## Transaction Model
///
/// - **Reads** (read/read_all/scan/read_scan): each call takes its own read
///   snapshot, so concurrent readers never share state
/// - **Writes** (write/delete/delete_all/delete_scan): one read-write
///   transaction per call, committed before returning; the store serializes
///   writers
/// - **Batched writes** (write_all): one write batch, flushed once
///
/// Every transaction, cursor and batch is released before the call returns,
/// on success and on error alike.
pub struct Engine<S = RedbStore> {
    store: S,
}

impl Engine<RedbStore> {
    /// Open or create an on-disk store with the given config
    ///
    /// On startup:
    /// 1. Create the data directory if it doesn't exist
    /// 2. Open or create the database file inside it
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let path = config.store_path();
        let store = RedbStore::open(&path, RedbOptions::from_config(&config))
            .map_err(|e| SweepError::store("failed to open underlying database", e))?;

        tracing::info!(path = %path.display(), "store opened");
        Ok(Self::with_store(store))
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }
}

impl<S: Store> Engine<S> {
    /// Wrap an already opened store
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the engine, releasing the store handle
    pub fn close(self) -> Result<()> {
        drop(self.store);
        tracing::debug!("store closed");
        Ok(())
    }

    // =========================================================================
    // Transactional Accessor
    // =========================================================================

    /// Run `f` against a read snapshot
    ///
    /// The snapshot is released whatever `f` returns.
    pub fn view<'s, R, F>(&'s self, f: F) -> Result<R>
    where
        S: 's,
        F: FnOnce(&S::Transaction<'s>) -> Result<R>,
    {
        let txn = self
            .store
            .begin_read()
            .map_err(|e| SweepError::store("failed to begin read transaction", e))?;

        let result = f(&txn);

        if let Err(e) = txn.rollback() {
            tracing::warn!("failed to release read snapshot: {}", e);
        }
        result
    }

    /// Run `f` against a read-write transaction
    ///
    /// Commits when `f` returns `Ok`, rolls back when it returns `Err`.
    pub fn update<'s, R, F>(&'s self, f: F) -> Result<R>
    where
        S: 's,
        F: FnOnce(&S::Transaction<'s>) -> Result<R>,
    {
        self.update_with("failed to commit transaction", f)
    }

    fn update_with<'s, R, F>(&'s self, commit_message: &str, f: F) -> Result<R>
    where
        S: 's,
        F: FnOnce(&S::Transaction<'s>) -> Result<R>,
    {
        let txn = self
            .store
            .begin_write()
            .map_err(|e| SweepError::store("failed to begin write transaction", e))?;

        match f(&txn) {
            Ok(value) => {
                txn.commit().map_err(|e| {
                    tracing::warn!("{}: {}", commit_message, e);
                    SweepError::commit(commit_message, e)
                })?;
                Ok(value)
            }
            Err(err) => {
                if let Err(e) = txn.rollback() {
                    tracing::warn!("failed to roll back transaction: {}", e);
                }
                Err(err)
            }
        }
    }

    // =========================================================================
    // Point Operations
    // =========================================================================

    /// Get the value stored under `key`
    ///
    /// Returns `NotFound` for an absent key and `EmptyStore` when the
    /// keyspace holds nothing at all.
    pub fn read(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.view(|txn| {
            ensure_populated(txn)?;
            txn.get(key)
                .map_err(|e| SweepError::store("failed to get key", e))?
                .ok_or(SweepError::NotFound)
        })
    }

    /// Set `key` to `value` in its own transaction
    pub fn write(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.update_with("failed to commit writes", |txn| {
            txn.set(key, value)
                .map_err(|e| SweepError::store("failed to set value", e))
        })
    }

    /// Delete `key` in its own transaction. Absent keys are not an error.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        self.update_with("failed to commit delete", |txn| {
            txn.delete(key)
                .map_err(|e| SweepError::store("failed to delete key", e))
        })
    }

    // =========================================================================
    // Multi-Key Operations
    // =========================================================================

    /// Get many keys in one sorted sweep
    ///
    /// Slot `i` of the result belongs to `keys[i]`; absent keys are `None`.
    pub fn read_all<K: AsRef<[u8]>>(&self, keys: &[K]) -> Result<Vec<Option<Vec<u8>>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        self.view(|txn| multiget::read_all(txn, keys))
    }

    /// Write every pair in one atomic batch
    ///
    /// `keys` and `values` must have the same length; otherwise nothing is
    /// written and `InvalidArgument` is returned.
    pub fn write_all<K, V>(&self, keys: &[K], values: &[V]) -> Result<()>
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        batch::write_all(&self.store, keys, values)
    }

    /// Delete every key in one transaction
    pub fn delete_all<K: AsRef<[u8]>>(&self, keys: &[K]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        self.update_with("failed to commit deletes", |txn| batch::delete_all(txn, keys))
    }

    // =========================================================================
    // Prefix Operations
    // =========================================================================

    /// Keys starting with `prefix`, ascending
    pub fn scan(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        self.view(|txn| scan::scan_keys(txn, prefix))
    }

    /// Keys and values whose key starts with `prefix`, ascending
    pub fn read_scan(&self, prefix: &[u8]) -> Result<Vec<KeyValue>> {
        self.view(|txn| scan::read_scan(txn, prefix))
    }

    /// Delete every key starting with `prefix` in one transaction
    ///
    /// Returns exactly the keys that were deleted.
    pub fn delete_scan(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        self.update_with("failed to commit deletes", |txn| scan::delete_scan(txn, prefix))
    }
}

/// Fail with `EmptyStore` when the transaction sees no entry at all
pub(crate) fn ensure_populated<T: Transaction>(txn: &T) -> Result<()> {
    let empty = txn
        .is_empty()
        .map_err(|e| SweepError::store("failed to open iterator", e))?;
    if empty {
        return Err(SweepError::empty_store());
    }
    Ok(())
}

/// Open a cursor, failing with `EmptyStore` if it starts out invalid
pub(crate) fn populated_cursor<T: Transaction>(txn: &T) -> Result<Cursor<'_, T>> {
    let cursor =
        Cursor::open(txn).map_err(|e| SweepError::store("failed to open iterator", e))?;
    if !cursor.valid() {
        return Err(SweepError::empty_store());
    }
    Ok(cursor)
}
