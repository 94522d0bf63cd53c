// storefront/src/store/local_store.rs

//! Defines `LocalStore`, the typed, bounded-time façade over a `StorageEngine`.
//!
//! The store owns two collections, `products` and `cart`. It is constructed
//! explicitly and shared through `Arc`; there is no process-wide instance.
//! Every public operation initializes the database on first use, and every
//! engine call is raced against `StoreConfig::op_timeout`.

use super::config::StoreConfig;
use super::ids::IdAllocator;
use crate::engine::{MemoryEngine, StorageEngine};
use crate::error::{StoreError, StoreResult};
use crate::models::{CartItem, Product, Record};

use anyhow::anyhow;
use futures_util::future::try_join_all;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{event, instrument, Level};

const COLLECTIONS: [&str; 2] = [Product::COLLECTION, CartItem::COLLECTION];

pub struct LocalStore {
  engine: Arc<dyn StorageEngine>,
  config: StoreConfig,
  ready: OnceCell<()>,
  cart_ids: IdAllocator,
}

impl LocalStore {
  pub fn new(engine: Arc<dyn StorageEngine>, config: StoreConfig) -> Self {
    Self {
      engine,
      config,
      ready: OnceCell::new(),
      cart_ids: IdAllocator::new(),
    }
  }

  /// A store over a fresh `MemoryEngine` with default configuration.
  pub fn in_memory() -> Self {
    Self::new(Arc::new(MemoryEngine::new()), StoreConfig::default())
  }

  pub fn config(&self) -> &StoreConfig {
    &self.config
  }

  pub fn is_initialized(&self) -> bool {
    self.ready.initialized()
  }

  /// Opens the database and creates missing collections.
  ///
  /// Concurrent callers share one in-flight attempt and the engine is opened
  /// at most once per successful initialization. A failure is returned to
  /// every waiter and is not retried here; the next call tries again.
  #[instrument(
    name = "LocalStore::initialize",
    skip_all,
    fields(db_name = %self.config.db_name, engine = self.engine.name()),
    err(Display)
  )]
  pub async fn initialize(&self) -> StoreResult<()> {
    self.ready.get_or_try_init(|| self.open_database()).await?;
    Ok(())
  }

  async fn open_database(&self) -> StoreResult<()> {
    event!(Level::DEBUG, version = self.config.version, "Opening database.");
    let init_error = |source: anyhow::Error| StoreError::Initialization {
      db_name: self.config.db_name.clone(),
      source,
    };

    let open = self
      .engine
      .open(&self.config.db_name, self.config.version, &COLLECTIONS);
    match tokio::time::timeout(self.config.op_timeout, open).await {
      Ok(Ok(())) => {}
      Ok(Err(e)) => return Err(init_error(e)),
      Err(_) => {
        return Err(init_error(anyhow!(
          "open did not complete within {:?}",
          self.config.op_timeout
        )))
      }
    }

    // Ids already on disk must never be handed out again.
    let rows = match tokio::time::timeout(self.config.op_timeout, self.engine.get_all(CartItem::COLLECTION)).await {
      Ok(Ok(rows)) => rows,
      Ok(Err(e)) => return Err(init_error(e.context("scanning cart ids"))),
      Err(_) => return Err(init_error(anyhow!("scanning cart ids timed out"))),
    };
    for id in rows.iter().filter_map(|row| row.get("id").and_then(Value::as_u64)) {
      self.cart_ids.observe(id);
    }

    event!(Level::INFO, cart_rows = rows.len(), "Database ready.");
    Ok(())
  }

  /// Runs one engine call under the configured deadline and classifies its
  /// failure.
  async fn bounded<T>(&self, operation: &'static str, call: impl Future<Output = anyhow::Result<T>>) -> StoreResult<T> {
    match tokio::time::timeout(self.config.op_timeout, call).await {
      Ok(Ok(value)) => Ok(value),
      Ok(Err(source)) => {
        event!(Level::WARN, operation, error = %source, "Engine call failed.");
        Err(StoreError::Storage { operation, source })
      }
      Err(_) => {
        event!(Level::WARN, operation, timeout = ?self.config.op_timeout, "Engine call timed out.");
        Err(StoreError::Timeout {
          operation,
          after: self.config.op_timeout,
        })
      }
    }
  }

  async fn put_record<R: Record>(&self, operation: &'static str, record: &R) -> StoreResult<()> {
    let value = encode(record)?;
    self
      .bounded(operation, self.engine.put(R::COLLECTION, record.key(), value))
      .await
  }

  async fn get_record<R: Record>(&self, operation: &'static str, key: u64) -> StoreResult<Option<R>> {
    let value = self.bounded(operation, self.engine.get(R::COLLECTION, key)).await?;
    value.map(decode::<R>).transpose()
  }

  async fn all_records<R: Record>(&self, operation: &'static str) -> StoreResult<Vec<R>> {
    let values = self.bounded(operation, self.engine.get_all(R::COLLECTION)).await?;
    values.into_iter().map(decode::<R>).collect()
  }

  // --- Products ---

  /// Upserts every product. The puts are issued together and all of them
  /// have completed when this returns.
  #[instrument(name = "LocalStore::put_products", skip_all, fields(count = products.len()), err(Display))]
  pub async fn put_products(&self, products: &[Product]) -> StoreResult<()> {
    self.initialize().await?;
    try_join_all(products.iter().map(|p| self.put_record("put_products", p))).await?;
    Ok(())
  }

  #[instrument(name = "LocalStore::list_products", skip_all, err(Display))]
  pub async fn list_products(&self) -> StoreResult<Vec<Product>> {
    self.initialize().await?;
    self.all_records("list_products").await
  }

  /// `Ok(None)` for an unknown id.
  #[instrument(name = "LocalStore::get_product", skip(self), err(Display))]
  pub async fn get_product(&self, id: u64) -> StoreResult<Option<Product>> {
    self.initialize().await?;
    self.get_record("get_product", id).await
  }

  // --- Cart ---

  #[instrument(name = "LocalStore::list_cart_items", skip_all, err(Display))]
  pub async fn list_cart_items(&self) -> StoreResult<Vec<CartItem>> {
    self.initialize().await?;
    self.all_records("list_cart_items").await
  }

  /// Inserts or replaces a cart row. Does not look at other rows; keeping one
  /// row per product is `CartState`'s job.
  #[instrument(
    name = "LocalStore::put_cart_item",
    skip_all,
    fields(item_id = item.id, product_id = item.product_id, quantity = item.quantity),
    err(Display)
  )]
  pub async fn put_cart_item(&self, item: &CartItem) -> StoreResult<()> {
    self.initialize().await?;
    if item.quantity == 0 {
      return Err(StoreError::InvalidQuantity { quantity: 0 });
    }
    self.put_record("put_cart_item", item).await?;
    self.cart_ids.observe(item.id);
    Ok(())
  }

  /// Rewrites the quantity of an existing row and returns the stored result.
  /// Returns `Ok(None)` without writing when no row has this id.
  #[instrument(name = "LocalStore::set_cart_item_quantity", skip(self), err(Display))]
  pub async fn set_cart_item_quantity(&self, id: u64, quantity: u32) -> StoreResult<Option<CartItem>> {
    self.initialize().await?;
    if quantity == 0 {
      return Err(StoreError::InvalidQuantity { quantity: 0 });
    }
    let Some(current) = self.get_record::<CartItem>("set_cart_item_quantity", id).await? else {
      event!(Level::DEBUG, "No cart row to update.");
      return Ok(None);
    };
    let updated = current.with_quantity(quantity);
    self.put_record("set_cart_item_quantity", &updated).await?;
    Ok(Some(updated))
  }

  /// Deleting an id that is not stored is a no-op.
  #[instrument(name = "LocalStore::delete_cart_item", skip(self), err(Display))]
  pub async fn delete_cart_item(&self, id: u64) -> StoreResult<()> {
    self.initialize().await?;
    self
      .bounded("delete_cart_item", self.engine.delete(CartItem::COLLECTION, id))
      .await
  }

  #[instrument(name = "LocalStore::clear_cart", skip_all, err(Display))]
  pub async fn clear_cart(&self) -> StoreResult<()> {
    self.initialize().await?;
    self
      .bounded("clear_cart", self.engine.clear(CartItem::COLLECTION))
      .await
  }

  /// Allocates an id for a new cart row. Ids are unique for the lifetime of
  /// the database as seen by this process.
  pub async fn next_cart_item_id(&self) -> StoreResult<u64> {
    self.initialize().await?;
    self.cart_ids.allocate().ok_or(StoreError::IdsExhausted {
      collection: CartItem::COLLECTION,
    })
  }
}

impl std::fmt::Debug for LocalStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LocalStore")
      .field("engine", &self.engine.name())
      .field("config", &self.config)
      .field("initialized", &self.is_initialized())
      .finish()
  }
}

fn encode<R: Record>(record: &R) -> StoreResult<Value> {
  serde_json::to_value(record).map_err(|source| StoreError::Corrupt {
    collection: R::COLLECTION,
    source,
  })
}

fn decode<R: Record>(value: Value) -> StoreResult<R> {
  serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
    collection: R::COLLECTION,
    source,
  })
}
