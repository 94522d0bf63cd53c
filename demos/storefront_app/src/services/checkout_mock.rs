// storefront_app/src/services/checkout_mock.rs
use crate::errors::{AppError, Result as AppResult};
use std::time::Duration;
use storefront::{CartItem, CartState, CartSummary};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct MockReceipt {
  pub order_ref: String,
  pub items: Vec<CartItem>,
  pub summary: CartSummary,
}

/// Simulates placing an order: waits `delay` as a stand-in for the payment
/// round-trip, then empties the cart. Stock levels are left alone.
#[instrument(skip(cart), fields(items = cart.len(), delay_ms = delay.as_millis() as u64))]
pub async fn place_mock_order(cart: &CartState, delay: Duration) -> AppResult<MockReceipt> {
  if cart.is_empty() {
    return Err(AppError::Checkout("Cart is empty".to_string()));
  }
  let items = cart.items();
  let summary = cart.summary();

  info!(total = %summary.total, "Simulating order placement.");
  tokio::time::sleep(delay).await; // Simulate processing

  cart.clear_cart().await?;

  let order_ref = format!("PWA-{}", chrono::Utc::now().timestamp_millis());
  info!(order_ref = %order_ref, "Mock order placed.");
  Ok(MockReceipt {
    order_ref,
    items,
    summary,
  })
}
