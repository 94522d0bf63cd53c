// storefront/src/engine/memory.rs

use super::StorageEngine;
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Default)]
struct MemoryDb {
  opened: Option<(String, u32)>,
  collections: HashMap<String, BTreeMap<u64, Value>>,
}

impl MemoryDb {
  fn collection(&self, name: &str) -> anyhow::Result<&BTreeMap<u64, Value>> {
    self.ensure_open()?;
    self
      .collections
      .get(name)
      .ok_or_else(|| anyhow!("collection '{}' does not exist", name))
  }

  fn collection_mut(&mut self, name: &str) -> anyhow::Result<&mut BTreeMap<u64, Value>> {
    self.ensure_open()?;
    self
      .collections
      .get_mut(name)
      .ok_or_else(|| anyhow!("collection '{}' does not exist", name))
  }

  fn ensure_open(&self) -> anyhow::Result<()> {
    if self.opened.is_none() {
      bail!("database is not open");
    }
    Ok(())
  }
}

/// Process-local engine. Clones share the same data, so a second
/// `LocalStore` built on a clone sees what the first one wrote.
#[derive(Clone, Default)]
pub struct MemoryEngine {
  db: Arc<RwLock<MemoryDb>>,
}

impl MemoryEngine {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl StorageEngine for MemoryEngine {
  fn name(&self) -> &'static str {
    "memory"
  }

  async fn open(&self, db_name: &str, version: u32, collections: &[&'static str]) -> anyhow::Result<()> {
    let mut db = self.db.write();
    if let Some((name, current)) = &db.opened {
      if name != db_name {
        bail!("engine already holds database '{}'", name);
      }
      if *current > version {
        bail!(
          "database '{}' is at version {}, newer than requested version {}",
          db_name,
          current,
          version
        );
      }
    }
    for collection in collections {
      db.collections.entry((*collection).to_string()).or_default();
    }
    db.opened = Some((db_name.to_string(), version));
    Ok(())
  }

  async fn put(&self, collection: &str, key: u64, value: Value) -> anyhow::Result<()> {
    self.db.write().collection_mut(collection)?.insert(key, value);
    Ok(())
  }

  async fn get(&self, collection: &str, key: u64) -> anyhow::Result<Option<Value>> {
    Ok(self.db.read().collection(collection)?.get(&key).cloned())
  }

  async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<Value>> {
    Ok(self.db.read().collection(collection)?.values().cloned().collect())
  }

  async fn delete(&self, collection: &str, key: u64) -> anyhow::Result<()> {
    self.db.write().collection_mut(collection)?.remove(&key);
    Ok(())
  }

  async fn clear(&self, collection: &str) -> anyhow::Result<()> {
    self.db.write().collection_mut(collection)?.clear();
    Ok(())
  }
}
