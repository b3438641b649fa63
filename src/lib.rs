//! # SweepKV
//!
//! A transactional access layer over an ordered key-value store with:
//! - Point reads, writes and deletes, each in its own transaction
//! - Multi-key reads resolved in one sorted sweep (sort-merge lookup)
//! - Prefix scans, including delete-while-scanning
//! - All-or-nothing bulk writes and deletes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Engine                              │
//! │        read / write / delete / *_all / *scan                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  view (snapshot) / update (read-write)
//!          ┌────────────┼────────────┬─────────────┐
//!          │            │            │             │
//!          ▼            ▼            ▼             ▼
//!   ┌────────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐
//!   │  Multi-Get │ │   Scan   │ │  Batch   │ │ Ordering │
//!   │  (sweep)   │ │ (prefix) │ │ (atomic) │ │  (sort)  │
//!   └─────┬──────┘ └────┬─────┘ └────┬─────┘ └──────────┘
//!         └─────────────┼────────────┘
//!                       ▼
//!          ┌─────────────────────────┐
//!          │  Store / Transaction /  │
//!          │  Cursor / WriteBatch    │
//!          └────────────┬────────────┘
//!                ┌──────┴───────┐
//!                ▼              ▼
//!         ┌────────────┐  ┌────────────┐
//!         │ RedbStore  │  │  MemTable  │
//!         │ (on disk)  │  │ (memory)   │
//!         └────────────┘  └────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod ordering;

pub mod engine;
pub mod memtable;
pub mod storage;
pub mod store;

mod batch;
mod multiget;
mod scan;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{Config, SyncStrategy};
pub use engine::Engine;
pub use error::{ErrorKind, Result, SweepError};
pub use memtable::MemTable;
pub use storage::RedbStore;
pub use store::{Cursor, KeyValue, Store, StoreError, Transaction, WriteBatch};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SweepKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
