// src/lib.rs

//! Storefront: local persistence and cart state for an offline-first shop.
//!
//! The crate provides:
//!  - A pluggable asynchronous `StorageEngine` (in-memory or JSON file).
//!  - `LocalStore`, a typed façade over two collections, `products` and
//!    `cart`, with lazy idempotent initialization and bounded-time calls.
//!  - `CartState`, an in-memory mirror of the cart that merges rows by
//!    product, removes rows whose quantity drops to zero and derives totals.
//!  - `ProductCatalog`, which seeds an empty catalog once and answers search
//!    and category queries.

pub mod cart;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod models;
pub mod shared;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::cart::{CartState, CartSummary};
pub use crate::catalog::{reference_products, ProductCatalog};
pub use crate::engine::{FileEngine, MemoryEngine, StorageEngine};
pub use crate::error::{StoreError, StoreResult};
pub use crate::models::{CartDraft, CartItem, Product, Record};
pub use crate::shared::Shared;
pub use crate::store::{LocalStore, StoreConfig};

// Prices throughout the API are `rust_decimal::Decimal`.
pub use rust_decimal::Decimal;

/*
    Typical session:
    1. Build an engine (`MemoryEngine::new()` or `FileEngine::new(dir)`).
    2. Wrap it: `Arc::new(LocalStore::new(Arc::new(engine), StoreConfig::default()))`.
    3. `ProductCatalog::new(store.clone()).load().await?` seeds on first run.
    4. `CartState::new(store.clone())`, then `cart.load().await?`.
    5. Mutate with `add_to_cart`, `update_quantity`, `remove_from_cart`,
       `clear_cart`; read `items()`, `total_price()`, `summary()`.
*/
