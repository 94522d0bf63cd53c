// storefront/src/models/mod.rs

//! Records persisted by the local store.

pub mod cart_item;
pub mod product;

pub use cart_item::{CartDraft, CartItem};
pub use product::Product;

use serde::{de::DeserializeOwned, Serialize};

/// A type stored as a document in one of the store's collections.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
  /// Name of the collection the record lives in.
  const COLLECTION: &'static str;

  /// Numeric primary key within the collection.
  fn key(&self) -> u64;
}
