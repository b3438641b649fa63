//! Redb store
//!
//! Owns the `redb::Database` handle and hands out transactions and batches.

use std::path::{Path, PathBuf};

use redb::{Database, Durability};

use crate::config::{Config, SyncStrategy};
use crate::store::{Store, StoreError, StoreResult};

use super::{RedbTransaction, RedbWriteBatch};

/// Options for opening a [`RedbStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RedbOptions {
    /// Page cache size in bytes (redb default when `None`)
    pub cache_size: Option<usize>,

    /// Durability of every commit and batch flush
    pub sync_strategy: SyncStrategy,
}

impl RedbOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache_size: config.cache_size,
            sync_strategy: config.sync_strategy,
        }
    }
}

/// An ordered store in a single redb file
pub struct RedbStore {
    db: Database,
    path: PathBuf,
    sync_strategy: SyncStrategy,
}

impl RedbStore {
    /// Open or create the database file at `path`
    pub fn open(path: impl AsRef<Path>, options: RedbOptions) -> StoreResult<Self> {
        let path = path.as_ref();

        let mut builder = Database::builder();
        if let Some(cache_size) = options.cache_size {
            builder.set_cache_size(cache_size);
        }
        let db = builder.create(path).map_err(StoreError::redb)?;

        tracing::debug!(path = %path.display(), "opened redb store");

        Ok(Self {
            db,
            path: path.to_path_buf(),
            sync_strategy: options.sync_strategy,
        })
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Begin a write transaction with the configured durability
    pub(crate) fn begin_raw_write(&self) -> StoreResult<redb::WriteTransaction> {
        let mut txn = self.db.begin_write().map_err(StoreError::redb)?;
        txn.set_durability(durability_for(self.sync_strategy));
        Ok(txn)
    }
}

fn durability_for(strategy: SyncStrategy) -> Durability {
    match strategy {
        SyncStrategy::EveryCommit => Durability::Immediate,
        SyncStrategy::Eventual => Durability::Eventual,
    }
}

impl Store for RedbStore {
    type Transaction<'a> = RedbTransaction;
    type Batch<'a> = RedbWriteBatch;

    fn begin_read(&self) -> StoreResult<RedbTransaction> {
        let txn = self.db.begin_read().map_err(StoreError::redb)?;
        RedbTransaction::new_read(txn)
    }

    fn begin_write(&self) -> StoreResult<RedbTransaction> {
        Ok(RedbTransaction::new_write(self.begin_raw_write()?))
    }

    fn write_batch(&self) -> StoreResult<RedbWriteBatch> {
        Ok(RedbWriteBatch::new(self.begin_raw_write()?))
    }
}
