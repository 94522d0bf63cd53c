// storefront/src/cart/mod.rs

//! The cart mirror and its business rules.

pub mod state;
pub mod summary;

pub use state::CartState;
pub use summary::CartSummary;
