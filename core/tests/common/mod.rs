// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use storefront::{CartDraft, Decimal, LocalStore, MemoryEngine, Product, StorageEngine, StoreConfig};
use tracing::Level;

// --- Engine with injectable faults ---

/// Wraps a `MemoryEngine`; named operations can be made to fail or stall.
/// Operation names match the trait methods: "open", "put", "get", "get_all",
/// "delete", "clear".
#[derive(Default)]
pub struct FaultyEngine {
  inner: MemoryEngine,
  failing: Mutex<HashSet<&'static str>>,
  stall: Mutex<Option<Duration>>,
  open_calls: AtomicUsize,
}

impl FaultyEngine {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn fail(&self, op: &'static str) {
    self.failing.lock().insert(op);
  }

  pub fn heal(&self, op: &'static str) {
    self.failing.lock().remove(op);
  }

  /// Every call sleeps this long before doing anything.
  pub fn stall_for(&self, delay: Duration) {
    *self.stall.lock() = Some(delay);
  }

  pub fn open_calls(&self) -> usize {
    self.open_calls.load(Ordering::SeqCst)
  }

  /// Direct access, bypassing faults.
  pub fn inner(&self) -> &MemoryEngine {
    &self.inner
  }

  async fn gate(&self, op: &'static str) -> anyhow::Result<()> {
    let stall = *self.stall.lock();
    if let Some(delay) = stall {
      tokio::time::sleep(delay).await;
    }
    if self.failing.lock().contains(op) {
      anyhow::bail!("injected failure in {}", op);
    }
    Ok(())
  }
}

#[async_trait]
impl StorageEngine for FaultyEngine {
  fn name(&self) -> &'static str {
    "faulty"
  }

  async fn open(&self, db_name: &str, version: u32, collections: &[&'static str]) -> anyhow::Result<()> {
    self.open_calls.fetch_add(1, Ordering::SeqCst);
    self.gate("open").await?;
    self.inner.open(db_name, version, collections).await
  }

  async fn put(&self, collection: &str, key: u64, value: Value) -> anyhow::Result<()> {
    self.gate("put").await?;
    self.inner.put(collection, key, value).await
  }

  async fn get(&self, collection: &str, key: u64) -> anyhow::Result<Option<Value>> {
    self.gate("get").await?;
    self.inner.get(collection, key).await
  }

  async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<Value>> {
    self.gate("get_all").await?;
    self.inner.get_all(collection).await
  }

  async fn delete(&self, collection: &str, key: u64) -> anyhow::Result<()> {
    self.gate("delete").await?;
    self.inner.delete(collection, key).await
  }

  async fn clear(&self, collection: &str) -> anyhow::Result<()> {
    self.gate("clear").await?;
    self.inner.clear(collection).await
  }
}

// --- Store builders ---

pub fn memory_store() -> Arc<LocalStore> {
  Arc::new(LocalStore::in_memory())
}

pub fn faulty_store(engine: &Arc<FaultyEngine>) -> Arc<LocalStore> {
  Arc::new(LocalStore::new(engine.clone(), StoreConfig::default()))
}

pub fn faulty_store_with(engine: &Arc<FaultyEngine>, config: StoreConfig) -> Arc<LocalStore> {
  Arc::new(LocalStore::new(engine.clone(), config))
}

// --- Records ---

pub fn draft(product_id: u64, quantity: u32, price: i64) -> CartDraft {
  CartDraft::new(product_id, quantity, Decimal::from(price)).named(format!("Product {}", product_id))
}

pub fn product(id: u64, name: &str, price_cents: i64, category: &str) -> Product {
  Product {
    id,
    name: name.to_string(),
    price: Decimal::new(price_cents, 2),
    image: format!("https://example.test/{}.jpg", id),
    description: format!("{} description", name),
    category: category.to_string(),
    stock: 5,
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
