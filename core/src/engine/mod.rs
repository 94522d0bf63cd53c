// storefront/src/engine/mod.rs

//! The object database underneath `LocalStore`.
//!
//! Engines deal in untyped JSON documents keyed by `u64`; typing and error
//! classification happen one layer up. Two implementations ship:
//!  - [`MemoryEngine`] keeps everything in a process-local map.
//!  - [`FileEngine`] keeps one JSON document per database on disk.

mod file;
mod memory;

pub use file::FileEngine;
pub use memory::MemoryEngine;

use async_trait::async_trait;
use serde_json::Value;

/// A keyed document store with named collections.
///
/// Implementations serialize their own mutations; callers may share one
/// engine behind an `Arc` and call it from several tasks.
#[async_trait]
pub trait StorageEngine: Send + Sync + 'static {
  /// Short name used in logs.
  fn name(&self) -> &'static str;

  /// Opens or creates `db_name` at `version`, creating any of `collections`
  /// that do not exist yet. Fails if the database is already at a newer
  /// version.
  async fn open(&self, db_name: &str, version: u32, collections: &[&'static str]) -> anyhow::Result<()>;

  /// Inserts or replaces the document at `key`.
  async fn put(&self, collection: &str, key: u64, value: Value) -> anyhow::Result<()>;

  async fn get(&self, collection: &str, key: u64) -> anyhow::Result<Option<Value>>;

  /// Every document in the collection. Order is not part of the contract.
  async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<Value>>;

  /// Removes the document at `key`. A missing key is not an error.
  async fn delete(&self, collection: &str, key: u64) -> anyhow::Result<()>;

  async fn clear(&self, collection: &str) -> anyhow::Result<()>;
}
