// storefront_app/src/services/mod.rs

pub mod checkout_mock;
