// storefront/examples/cart_session.rs

use std::sync::Arc;
use storefront::{CartDraft, CartState, LocalStore, MemoryEngine, ProductCatalog, StoreConfig, StoreError};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), StoreError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Cart Session Example ---");

  // 1. One store, shared by the catalog and the cart.
  let store = Arc::new(LocalStore::new(Arc::new(MemoryEngine::new()), StoreConfig::default()));

  // 2. First load seeds the reference catalog.
  let catalog = ProductCatalog::new(store.clone());
  let count = catalog.load().await?;
  info!("Catalog holds {} products in {:?}", count, catalog.categories());

  // 3. Restore (empty) cart state.
  let cart = CartState::new(store.clone());
  cart.load().await?;

  // 4. Adding the same product twice merges into one line.
  let headphones = catalog.search("headphones");
  if let Some(product) = headphones.first() {
    cart.add_to_cart(CartDraft::from_product(product, 1)).await?;
    let line = cart.add_to_cart(CartDraft::from_product(product, 2)).await?;
    info!("{} x{}", line.name, line.quantity);
  }
  for product in catalog.by_category("Clothing") {
    cart.add_to_cart(CartDraft::from_product(&product, 1)).await?;
  }

  let summary = cart.summary();
  info!(
    "{} items, subtotal {}, tax {}, shipping {}, total {}",
    cart.total_item_count(),
    summary.subtotal,
    summary.tax,
    summary.shipping,
    summary.total
  );

  // 5. Quantity zero removes the line.
  if let Some(first) = cart.items().first() {
    cart.update_quantity(first.id, 0).await?;
  }
  info!("After removal: {} line(s), total {}", cart.len(), cart.total_price());

  cart.clear_cart().await?;
  info!("--- Example Finished ---");
  Ok(())
}
