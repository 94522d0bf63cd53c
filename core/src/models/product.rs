// storefront/src/models/product.rs

use super::Record;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: u64, // Assigned when the catalog is seeded
  pub name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub image: String,
  pub description: String,
  pub category: String, // Free-form label, used for faceting
  pub stock: u32,       // Never decremented; checkout is a mock
}

impl Product {
  /// Case-insensitive substring match over name, description and category.
  /// `needle` must already be lowercase.
  pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self.description.to_lowercase().contains(needle)
      || self.category.to_lowercase().contains(needle)
  }
}

impl Record for Product {
  const COLLECTION: &'static str = "products";

  fn key(&self) -> u64 {
    self.id
  }
}
