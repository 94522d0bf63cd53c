// storefront/src/catalog/mod.rs

//! Read-mostly access to the product catalog.

pub mod accessor;
pub mod seed;

pub use accessor::ProductCatalog;
pub use seed::reference_products;
