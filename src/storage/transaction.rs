//! Redb transaction implementation.
//!
//! `RedbTransaction` wraps either a read snapshot or a write transaction
//! behind the [`Transaction`] trait. Write transactions open the data table
//! per call, so a cursor and a delete never hold the table at the same time.

use std::ops::Bound;

use redb::{
    ReadOnlyTable, ReadTransaction, ReadableTable, ReadableTableMetadata, TableError,
    WriteTransaction,
};

use crate::store::{KeyValue, StoreError, StoreResult, Transaction};

use super::DATA_TABLE;

type DataTable = ReadOnlyTable<&'static [u8], &'static [u8]>;

/// A transaction for the redb store.
///
/// Note: `large_enum_variant` is allowed because transactions are short-lived
/// and boxing would add an indirection to every call.
#[allow(clippy::large_enum_variant)]
pub enum RedbTransaction {
    /// A read-only snapshot. `table` is `None` when nothing was ever written.
    Read {
        table: Option<DataTable>,
        _txn: ReadTransaction,
    },
    /// A read-write transaction. Aborted on drop unless committed.
    Write(WriteTransaction),
}

impl RedbTransaction {
    /// Wrap a read transaction, opening the data table up front.
    pub fn new_read(txn: ReadTransaction) -> StoreResult<Self> {
        let table = match txn.open_table(DATA_TABLE) {
            Ok(table) => Some(table),
            Err(TableError::TableDoesNotExist(_)) => None,
            Err(e) => return Err(StoreError::redb(e)),
        };
        Ok(Self::Read { table, _txn: txn })
    }

    pub fn new_write(txn: WriteTransaction) -> Self {
        Self::Write(txn)
    }

    fn writer(&self) -> StoreResult<&WriteTransaction> {
        match self {
            Self::Read { .. } => Err(StoreError::ReadOnly),
            Self::Write(txn) => Ok(txn),
        }
    }
}

impl Transaction for RedbTransaction {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        match self {
            Self::Read { table: None, .. } => Ok(None),
            Self::Read {
                table: Some(table), ..
            } => get_from(table, key),
            Self::Write(txn) => {
                let table = txn.open_table(DATA_TABLE).map_err(StoreError::redb)?;
                get_from(&table, key)
            }
        }
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let txn = self.writer()?;
        let mut table = txn.open_table(DATA_TABLE).map_err(StoreError::redb)?;
        table.insert(key, value).map_err(StoreError::redb)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StoreResult<()> {
        let txn = self.writer()?;
        let mut table = txn.open_table(DATA_TABLE).map_err(StoreError::redb)?;
        table.remove(key).map_err(StoreError::redb)?;
        Ok(())
    }

    fn seek(&self, from: Bound<&[u8]>) -> StoreResult<Option<KeyValue>> {
        match self {
            Self::Read { table: None, .. } => Ok(None),
            Self::Read {
                table: Some(table), ..
            } => first_from(table, from),
            Self::Write(txn) => {
                let table = txn.open_table(DATA_TABLE).map_err(StoreError::redb)?;
                first_from(&table, from)
            }
        }
    }

    fn is_empty(&self) -> StoreResult<bool> {
        match self {
            Self::Read { table: None, .. } => Ok(true),
            Self::Read {
                table: Some(table), ..
            } => table.is_empty().map_err(StoreError::redb),
            Self::Write(txn) => {
                let table = txn.open_table(DATA_TABLE).map_err(StoreError::redb)?;
                table.is_empty().map_err(StoreError::redb)
            }
        }
    }

    fn commit(self) -> StoreResult<()> {
        match self {
            // Read snapshots are released on drop
            Self::Read { .. } => Ok(()),
            Self::Write(txn) => txn.commit().map_err(StoreError::redb),
        }
    }

    fn rollback(self) -> StoreResult<()> {
        match self {
            Self::Read { .. } => Ok(()),
            Self::Write(txn) => txn.abort().map_err(StoreError::redb),
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

fn get_from<T>(table: &T, key: &[u8]) -> StoreResult<Option<Vec<u8>>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let value = table.get(key).map_err(StoreError::redb)?;
    Ok(value.map(|guard| guard.value().to_vec()))
}

/// Copy out the first entry of `table` at or after `from`.
fn first_from<T>(table: &T, from: Bound<&[u8]>) -> StoreResult<Option<KeyValue>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let bounds: (Bound<&[u8]>, Bound<&[u8]>) = (from, Bound::Unbounded);
    let mut range = table.range::<&[u8]>(bounds).map_err(StoreError::redb)?;

    match range.next() {
        Some(entry) => {
            let (key, value) = entry.map_err(StoreError::redb)?;
            Ok(Some((key.value().to_vec(), value.value().to_vec())))
        }
        None => Ok(None),
    }
}
