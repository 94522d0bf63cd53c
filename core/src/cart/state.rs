// storefront/src/cart/state.rs

//! Defines `CartState`, the in-memory mirror of the `cart` collection.
//!
//! Every mutation goes to the store first. The mirror changes only after the
//! store confirms, so a failed write never leaves the mirror claiming
//! something that was not recorded. Failed mutations are logged and returned
//! to the caller, who can offer a retry.
//!
//! Clones share one mutation lock, held from the mirror lookup to the mirror
//! update, so two adds of the same product cannot both insert.

use super::summary::CartSummary;
use crate::error::{StoreError, StoreResult};
use crate::models::{CartDraft, CartItem};
use crate::shared::Shared;
use crate::store::LocalStore;

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct CartState {
  store: Arc<LocalStore>,
  items: Shared<Vec<CartItem>>,
  ops: Arc<Mutex<()>>,
}

impl CartState {
  /// Starts with an empty mirror; call [`CartState::load`] to fill it.
  pub fn new(store: Arc<LocalStore>) -> Self {
    Self {
      store,
      items: Shared::default(),
      ops: Arc::new(Mutex::new(())),
    }
  }

  /// Replaces the mirror with the stored cart, ordered by id.
  ///
  /// A store that cannot be opened is reported as
  /// `StoreError::Initialization`. Any other failed read is logged and the
  /// mirror keeps its previous contents.
  #[instrument(name = "CartState::load", skip_all, err(Display))]
  pub async fn load(&self) -> StoreResult<()> {
    let _guard = self.ops.lock().await;
    match self.store.list_cart_items().await {
      Ok(mut items) => {
        items.sort_by_key(|item| item.id);
        event!(Level::DEBUG, count = items.len(), "Cart mirror refreshed.");
        self.items.replace(items);
        Ok(())
      }
      Err(e @ StoreError::Initialization { .. }) => Err(e),
      Err(e) => {
        event!(Level::ERROR, error = %e, "Failed to load cart items; keeping previous mirror.");
        Ok(())
      }
    }
  }

  /// Adds a draft to the cart. If the product is already present the
  /// quantities are summed on the existing row instead of adding a second
  /// one. Returns the row as stored.
  #[instrument(
    name = "CartState::add_to_cart",
    skip_all,
    fields(product_id = draft.product_id, quantity = draft.quantity),
    err(Display)
  )]
  pub async fn add_to_cart(&self, draft: CartDraft) -> StoreResult<CartItem> {
    if draft.quantity == 0 {
      return Err(StoreError::InvalidQuantity { quantity: 0 });
    }

    let _guard = self.ops.lock().await;
    let existing = self.find_by_product(draft.product_id);
    let stored = match existing {
      Some(existing) => {
        let merged = existing.quantity.saturating_add(draft.quantity);
        event!(Level::DEBUG, item_id = existing.id, merged, "Merging into existing row.");
        self.merge_quantity(&existing, merged).await
      }
      None => self.insert_new(draft).await,
    }
    .inspect_err(|e| event!(Level::ERROR, error = %e, "Add to cart failed; mirror unchanged."))?;

    self.upsert_mirror(stored.clone());
    Ok(stored)
  }

  async fn merge_quantity(&self, existing: &CartItem, merged: u32) -> StoreResult<CartItem> {
    match self.store.set_cart_item_quantity(existing.id, merged).await? {
      Some(updated) => Ok(updated),
      None => {
        // The mirror had a row the store lost; write it back whole.
        event!(Level::WARN, item_id = existing.id, "Cart row missing from store; re-inserting.");
        let item = existing.with_quantity(merged);
        self.store.put_cart_item(&item).await?;
        Ok(item)
      }
    }
  }

  async fn insert_new(&self, draft: CartDraft) -> StoreResult<CartItem> {
    let id = self.store.next_cart_item_id().await?;
    let item = draft.into_item(id);
    self.store.put_cart_item(&item).await?;
    Ok(item)
  }

  /// Sets a row's quantity. Zero or below removes the row and returns
  /// `Ok(None)`, as does an id the store does not know.
  #[instrument(name = "CartState::update_quantity", skip(self), err(Display))]
  pub async fn update_quantity(&self, id: u64, quantity: i64) -> StoreResult<Option<CartItem>> {
    let _guard = self.ops.lock().await;
    if quantity <= 0 {
      self.remove_locked(id).await?;
      return Ok(None);
    }
    let quantity = u32::try_from(quantity).map_err(|_| StoreError::InvalidQuantity { quantity })?;

    let stored = self
      .store
      .set_cart_item_quantity(id, quantity)
      .await
      .inspect_err(|e| event!(Level::ERROR, error = %e, "Quantity update failed; mirror unchanged."))?;

    match &stored {
      Some(updated) => self.upsert_mirror(updated.clone()),
      None => self.items.write().retain(|item| item.id != id),
    }
    Ok(stored)
  }

  /// Removing an id that is not in the cart succeeds.
  #[instrument(name = "CartState::remove_from_cart", skip(self), err(Display))]
  pub async fn remove_from_cart(&self, id: u64) -> StoreResult<()> {
    let _guard = self.ops.lock().await;
    self.remove_locked(id).await
  }

  /// Caller holds `ops`.
  async fn remove_locked(&self, id: u64) -> StoreResult<()> {
    self
      .store
      .delete_cart_item(id)
      .await
      .inspect_err(|e| event!(Level::ERROR, error = %e, "Remove failed; mirror unchanged."))?;
    self.items.write().retain(|item| item.id != id);
    Ok(())
  }

  /// Empties the cart, e.g. after checkout.
  #[instrument(name = "CartState::clear_cart", skip_all, err(Display))]
  pub async fn clear_cart(&self) -> StoreResult<()> {
    let _guard = self.ops.lock().await;
    self
      .store
      .clear_cart()
      .await
      .inspect_err(|e| event!(Level::ERROR, error = %e, "Clear failed; mirror unchanged."))?;
    self.items.write().clear();
    Ok(())
  }

  fn upsert_mirror(&self, item: CartItem) {
    let mut items = self.items.write();
    match items.iter_mut().find(|existing| existing.id == item.id) {
      Some(slot) => *slot = item,
      None => items.push(item),
    }
  }

  // --- Reads over the mirror ---

  /// Σ quantity × unit price captured at add time.
  pub fn total_price(&self) -> Decimal {
    self.items.read().iter().map(CartItem::line_total).sum()
  }

  pub fn total_item_count(&self) -> u64 {
    self.items.read().iter().map(|item| u64::from(item.quantity)).sum()
  }

  pub fn summary(&self) -> CartSummary {
    CartSummary::from_subtotal(self.total_price())
  }

  /// Snapshot of the mirror.
  pub fn items(&self) -> Vec<CartItem> {
    self.items.read().clone()
  }

  pub fn get(&self, id: u64) -> Option<CartItem> {
    self.items.read().iter().find(|item| item.id == id).cloned()
  }

  pub fn find_by_product(&self, product_id: u64) -> Option<CartItem> {
    self
      .items
      .read()
      .iter()
      .find(|item| item.product_id == product_id)
      .cloned()
  }

  pub fn len(&self) -> usize {
    self.items.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }

  pub fn store(&self) -> &Arc<LocalStore> {
    &self.store
  }
}
