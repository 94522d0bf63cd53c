// storefront_app/src/commands/product_commands.rs

use tracing::{info, instrument};

use super::money;
use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;
use storefront::Product;

fn print_row(product: &Product) {
  println!(
    "{:>4}  {:<28} {:>10}  {:<12} stock {}",
    product.id,
    product.name,
    money(product.price),
    product.category,
    product.stock
  );
}

fn print_list(products: &[Product]) {
  if products.is_empty() {
    println!("No products found.");
  }
  for product in products {
    print_row(product);
  }
}

pub fn list_products(app_state: &AppState) -> AppResult<()> {
  print_list(&app_state.catalog.products());
  Ok(())
}

#[instrument(name = "command::search", skip(app_state))]
pub fn search(app_state: &AppState, query: &str) -> AppResult<()> {
  let hits = app_state.catalog.search(query);
  info!(hits = hits.len(), "Search complete.");
  print_list(&hits);
  Ok(())
}

pub fn by_category(app_state: &AppState, category: &str) -> AppResult<()> {
  print_list(&app_state.catalog.by_category(category));
  Ok(())
}

pub fn categories(app_state: &AppState) -> AppResult<()> {
  for category in app_state.catalog.categories() {
    println!("{}", category);
  }
  Ok(())
}

#[instrument(name = "command::show", skip(app_state))]
pub async fn show(app_state: &AppState, id: u64) -> AppResult<()> {
  let product = app_state
    .catalog
    .get_product(id)
    .await
    .ok_or_else(|| AppError::NotFound(format!("product {}", id)))?;

  println!("{} ({})", product.name, product.category);
  println!("  {}", product.description);
  println!("  price {}  stock {}", money(product.price), product.stock);
  println!("  {}", product.image);
  Ok(())
}
