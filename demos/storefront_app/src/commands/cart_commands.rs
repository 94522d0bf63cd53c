// storefront_app/src/commands/cart_commands.rs

use tracing::{info, instrument, warn};

use super::money;
use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;
use storefront::{CartDraft, CartState};

#[instrument(name = "command::add_to_cart", skip(app_state))]
pub async fn add(app_state: &AppState, product_id: u64, quantity: u32) -> AppResult<()> {
  let product = app_state
    .catalog
    .get_product(product_id)
    .await
    .ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))?;

  let item = app_state
    .cart
    .add_to_cart(CartDraft::from_product(&product, quantity))
    .await?;
  info!(item_id = item.id, quantity = item.quantity, "Cart line written.");
  println!("{} x{} in cart (line {}).", item.name, item.quantity, item.id);
  Ok(())
}

#[instrument(name = "command::set_quantity", skip(app_state))]
pub async fn set_quantity(app_state: &AppState, item_id: u64, quantity: i64) -> AppResult<()> {
  match app_state.cart.update_quantity(item_id, quantity).await? {
    Some(item) => println!("{} now x{}.", item.name, item.quantity),
    None if quantity <= 0 => println!("Removed line {}.", item_id),
    None => {
      warn!(item_id, "No such cart line.");
      return Err(AppError::NotFound(format!("cart line {}", item_id)));
    }
  }
  Ok(())
}

pub async fn remove(app_state: &AppState, item_id: u64) -> AppResult<()> {
  app_state.cart.remove_from_cart(item_id).await?;
  println!("Removed line {}.", item_id);
  Ok(())
}

pub async fn clear(app_state: &AppState) -> AppResult<()> {
  app_state.cart.clear_cart().await?;
  println!("Cart cleared.");
  Ok(())
}

pub fn show_cart(app_state: &AppState) -> AppResult<()> {
  print_cart(&app_state.cart);
  Ok(())
}

pub(crate) fn print_cart(cart: &CartState) {
  if cart.is_empty() {
    println!("Your cart is empty.");
    return;
  }
  for item in cart.items() {
    println!(
      "{:>4}  {:<28} {:>3} x {:>9} = {:>10}",
      item.id,
      item.name,
      item.quantity,
      money(item.price),
      money(item.line_total())
    );
  }
  let summary = cart.summary();
  println!("  items     {}", cart.total_item_count());
  println!("  subtotal  {}", money(summary.subtotal));
  println!("  tax       {}", money(summary.tax));
  println!("  shipping  {}", money(summary.shipping));
  println!("  total     {}", money(summary.total));
}
