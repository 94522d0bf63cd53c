// storefront_app/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use storefront::{CartState, LocalStore, ProductCatalog};

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<LocalStore>,
  pub catalog: ProductCatalog,
  pub cart: CartState,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wires catalog and cart over one shared store. Nothing is loaded yet.
  pub fn new(store: Arc<LocalStore>, config: Arc<AppConfig>) -> Self {
    let catalog = if config.seed_catalog {
      ProductCatalog::new(store.clone())
    } else {
      ProductCatalog::with_seed(store.clone(), Vec::new())
    };
    let cart = CartState::new(store.clone());
    Self {
      store,
      catalog,
      cart,
      config,
    }
  }
}
