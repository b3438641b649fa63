//! MemTable Module
//!
//! In-memory ordered store implementing the [`Store`](crate::store::Store)
//! traits.
//!
//! ## Responsibilities
//! - Ordered keyspace for tests, benchmarks and ephemeral use
//! - Snapshot isolation for readers
//! - Single-writer access pattern
//! - Atomic write batches
//!
//! ## Data Structure Choice
//! A `BTreeMap` behind `RwLock<Arc<..>>`:
//! - Ordered keys (cursors walk the map's natural order)
//! - A read snapshot is one `Arc` clone, never blocked by writers
//! - Writers stage changes in an overlay and apply them on commit; the map
//!   is copied only while a reader snapshot still shares it

mod batch;
mod table;

pub use batch::MemWriteBatch;
pub use table::{MemTable, MemTransaction};
