// storefront_app/src/commands/checkout_commands.rs

use tracing::instrument;

use super::cart_commands::print_cart;
use super::money;
use crate::errors::Result as AppResult;
use crate::services::checkout_mock::place_mock_order;
use crate::state::AppState;

#[instrument(name = "command::checkout", skip(app_state))]
pub async fn checkout(app_state: &AppState) -> AppResult<()> {
  print_cart(&app_state.cart);
  println!("Placing order...");

  let receipt = place_mock_order(&app_state.cart, app_state.config.checkout_delay).await?;
  println!(
    "Order {} placed: {} line(s), {} charged.",
    receipt.order_ref,
    receipt.items.len(),
    money(receipt.summary.total)
  );
  Ok(())
}
