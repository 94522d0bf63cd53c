// storefront/src/store/mod.rs

//! The `LocalStore` façade and its configuration.

pub mod config;
mod ids;
pub mod local_store;

pub use config::StoreConfig;
pub use local_store::LocalStore;
