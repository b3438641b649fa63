//! Storage Module
//!
//! Persistent store backed by redb, a pure-Rust embedded B-tree database.
//!
//! ## Responsibilities
//! - Open or create the database file for a data directory
//! - Snapshot reads and serialized read-write transactions
//! - Ordered iteration for cursors
//! - Write batches committed as one unit
//!
//! ## Layout
//! ```text
//! {data_dir}/
//!   └── sweepkv.redb      (single redb file)
//!         └── table "sweepkv_data": &[u8] -> &[u8]
//! ```
//!
//! A read snapshot taken before the first write finds no table at all; that
//! is reported as an empty keyspace, not as an error.

mod batch;
mod redb_store;
mod transaction;

pub use batch::RedbWriteBatch;
pub use redb_store::{RedbOptions, RedbStore};
pub use transaction::RedbTransaction;

use redb::TableDefinition;

/// The single table holding the keyspace
pub(crate) const DATA_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("sweepkv_data");
