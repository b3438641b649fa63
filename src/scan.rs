//! Scan Module
//!
//! Prefix iteration in three flavours: keys only, keys with values, and
//! delete-while-scanning. All of them seek to the prefix and walk forward
//! while the current key still carries it, so results come out in ascending
//! byte order.
//!
//! An empty store is reported as `EmptyStore`. A populated store with no key
//! under the prefix yields an empty vector.

use crate::engine::populated_cursor;
use crate::error::{Result, SweepError};
use crate::store::{KeyValue, Transaction};

/// Call `visit` for every entry whose key starts with `prefix`
fn walk_prefix<T, F>(txn: &T, prefix: &[u8], mut visit: F) -> Result<()>
where
    T: Transaction,
    F: FnMut(&[u8], &[u8]) -> Result<()>,
{
    let mut cursor = populated_cursor(txn)?;
    cursor
        .seek(prefix)
        .map_err(|e| SweepError::store("failed to seek iterator", e))?;

    while cursor.valid_for_prefix(prefix) {
        let (Some(key), Some(value)) = (cursor.key(), cursor.value()) else {
            break;
        };
        visit(key, value)?;
        cursor
            .advance()
            .map_err(|e| SweepError::store("failed to advance iterator", e))?;
    }
    Ok(())
}

pub(crate) fn scan_keys<T: Transaction>(txn: &T, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut keys = Vec::new();
    walk_prefix(txn, prefix, |key, _| {
        keys.push(key.to_vec());
        Ok(())
    })?;

    tracing::debug!(matched = keys.len(), "prefix scan finished");
    Ok(keys)
}

pub(crate) fn read_scan<T: Transaction>(txn: &T, prefix: &[u8]) -> Result<Vec<KeyValue>> {
    let mut entries = Vec::new();
    walk_prefix(txn, prefix, |key, value| {
        entries.push((key.to_vec(), value.to_vec()));
        Ok(())
    })?;

    tracing::debug!(matched = entries.len(), "prefix read-scan finished");
    Ok(entries)
}

/// Delete every key under `prefix` through `txn`, returning the deleted keys
///
/// The caller commits `txn`; nothing is visible to others before that.
pub(crate) fn delete_scan<T: Transaction>(txn: &T, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut deleted = Vec::new();
    walk_prefix(txn, prefix, |key, _| {
        txn.delete(key)
            .map_err(|e| SweepError::store("failed to delete key", e))?;
        deleted.push(key.to_vec());
        Ok(())
    })?;

    tracing::debug!(deleted = deleted.len(), "prefix delete staged");
    Ok(deleted)
}
