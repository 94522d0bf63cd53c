// storefront/src/models/cart_item.rs

use super::{Product, Record};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted cart row. Price, name and image are copies taken when the
/// product was added, so later catalog changes do not affect the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub id: u64,
  pub product_id: u64,
  pub quantity: u32,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal, // Unit price at add time
  pub name: String,
  pub image: String,
}

impl CartItem {
  /// quantity × captured unit price.
  pub fn line_total(&self) -> Decimal {
    self.price * Decimal::from(self.quantity)
  }

  pub(crate) fn with_quantity(&self, quantity: u32) -> Self {
    Self {
      quantity,
      ..self.clone()
    }
  }
}

impl Record for CartItem {
  const COLLECTION: &'static str = "cart";

  fn key(&self) -> u64 {
    self.id
  }
}

/// What a caller hands to `CartState::add_to_cart`: a cart item that has not
/// been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CartDraft {
  pub product_id: u64,
  pub quantity: u32,
  pub price: Decimal,
  pub name: String,
  pub image: String,
}

impl CartDraft {
  pub fn new(product_id: u64, quantity: u32, price: Decimal) -> Self {
    Self {
      product_id,
      quantity,
      price,
      name: String::new(),
      image: String::new(),
    }
  }

  /// Captures the product's current price, name and image.
  pub fn from_product(product: &Product, quantity: u32) -> Self {
    Self {
      product_id: product.id,
      quantity,
      price: product.price,
      name: product.name.clone(),
      image: product.image.clone(),
    }
  }

  pub fn named(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub(crate) fn into_item(self, id: u64) -> CartItem {
    CartItem {
      id,
      product_id: self.product_id,
      quantity: self.quantity,
      price: self.price,
      name: self.name,
      image: self.image,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn persists_with_camel_case_layout() {
    let item = CartDraft::new(7, 2, Decimal::new(1050, 2)).named("Mug").into_item(3);
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(
      value,
      json!({"id": 3, "productId": 7, "quantity": 2, "price": 10.5, "name": "Mug", "image": ""})
    );

    let back: CartItem = serde_json::from_value(value).unwrap();
    assert_eq!(back.price, Decimal::new(105, 1));
    assert_eq!(back.line_total(), Decimal::from(21));
  }
}
