//! Configuration for SweepKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Configuration for opening an on-disk store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the database file
    /// Internal structure:
    ///   {data_dir}/
    ///     └── {file_name}      (redb database)
    pub data_dir: PathBuf,

    /// Name of the database file inside `data_dir`
    pub file_name: String,

    /// Page cache size in bytes; redb's default when `None`
    pub cache_size: Option<usize>,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// How commits reach the disk
    pub sync_strategy: SyncStrategy,
}

/// Commit durability strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync on every commit and batch flush (safest, slowest)
    #[default]
    EveryCommit,

    /// Commits are persisted eventually; a crash may lose the latest ones
    Eventual,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./sweepkv_data"),
            file_name: "sweepkv.redb".to_string(),
            cache_size: None,
            sync_strategy: SyncStrategy::EveryCommit,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the database file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the database file name
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    /// Set the page cache size (in bytes)
    pub fn cache_size(mut self, bytes: usize) -> Self {
        self.config.cache_size = Some(bytes);
        self
    }

    /// Set the commit durability strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
