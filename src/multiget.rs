//! Multi-Get Module
//!
//! Resolves a batch of point lookups with one forward sweep.
//!
//! ## Algorithm
//! 1. Order the requested keys by byte value (without moving them)
//! 2. Open a cursor; an invalid fresh cursor means the store is empty
//! 3. For each key in sorted order, seek to it unless the cursor already
//!    sits on the first entry at or after it
//! 4. Exhausted cursor: this key and every larger one are absent
//! 5. Cursor on a different key: this key is absent, keep going forward
//! 6. Cursor on the key: copy the value into the key's original slot

use crate::engine::populated_cursor;
use crate::error::{Result, SweepError};
use crate::ordering::sorted_order;
use crate::store::{Cursor, Transaction};

/// Look up every key in `keys` inside `txn`
///
/// The result has one slot per input key, in input order.
pub(crate) fn read_all<T, K>(txn: &T, keys: &[K]) -> Result<Vec<Option<Vec<u8>>>>
where
    T: Transaction,
    K: AsRef<[u8]>,
{
    let mut values: Vec<Option<Vec<u8>>> = vec![None; keys.len()];
    let mut cursor = populated_cursor(txn)?;

    let mut previous: Option<&[u8]> = None;
    let mut found = 0usize;

    for index in sorted_order(keys) {
        let key = keys[index].as_ref();

        if !already_positioned(&cursor, previous, key) {
            cursor
                .seek(key)
                .map_err(|e| SweepError::store("failed to seek iterator", e))?;
        }
        previous = Some(key);

        let Some((current, value)) = cursor.current() else {
            break;
        };
        if current != key {
            continue;
        }

        values[index] = Some(value.to_vec());
        found += 1;
    }

    tracing::debug!(requested = keys.len(), found, "multi-get finished");
    Ok(values)
}

/// Whether the cursor already points at the first entry `>= key`
///
/// True only when the last seek was for a key `<= key` and the cursor has not
/// fallen behind `key`: no entry can then lie between `key` and the cursor.
/// Anything else (including out-of-order input) gets a fresh seek.
fn already_positioned<T: Transaction>(
    cursor: &Cursor<'_, T>,
    previous: Option<&[u8]>,
    key: &[u8],
) -> bool {
    match (previous, cursor.key()) {
        (Some(previous), Some(current)) => previous <= key && current >= key,
        _ => false,
    }
}
