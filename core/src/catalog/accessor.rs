// storefront/src/catalog/accessor.rs

use super::seed::reference_products;
use crate::error::{StoreError, StoreResult};
use crate::models::Product;
use crate::shared::Shared;
use crate::store::LocalStore;

use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Loads the catalog once, seeding it when empty, and answers queries over
/// the loaded list. Nothing here writes to the store after the seed.
#[derive(Clone)]
pub struct ProductCatalog {
  store: Arc<LocalStore>,
  products: Shared<Vec<Product>>,
  seed: Arc<Vec<Product>>,
}

impl ProductCatalog {
  /// A catalog seeded with [`reference_products`].
  pub fn new(store: Arc<LocalStore>) -> Self {
    Self::with_seed(store, reference_products())
  }

  pub fn with_seed(store: Arc<LocalStore>, seed: Vec<Product>) -> Self {
    Self {
      store,
      products: Shared::default(),
      seed: Arc::new(seed),
    }
  }

  /// Reads every product. An empty collection is seeded and read again, so
  /// repeated loads never duplicate the seed set.
  ///
  /// On failure the previously loaded list is kept and the error is logged
  /// and returned.
  #[instrument(name = "ProductCatalog::load", skip_all, err(Display))]
  pub async fn load(&self) -> StoreResult<usize> {
    let result = async {
      let mut products = self.store.list_products().await?;
      if products.is_empty() && !self.seed.is_empty() {
        event!(Level::INFO, count = self.seed.len(), "Catalog empty; seeding reference products.");
        self.store.put_products(&self.seed).await?;
        products = self.store.list_products().await?;
      }
      Ok::<_, StoreError>(products)
    }
    .await;

    match result {
      Ok(mut products) => {
        products.sort_by_key(|p| p.id);
        let count = products.len();
        self.products.replace(products);
        Ok(count)
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Failed to load products.");
        Err(e)
      }
    }
  }

  /// The loaded catalog, ordered by id.
  pub fn products(&self) -> Vec<Product> {
    self.products.read().clone()
  }

  /// Point lookup against the store. Storage errors are logged and read as
  /// absent.
  pub async fn get_product(&self, id: u64) -> Option<Product> {
    match self.store.get_product(id).await {
      Ok(product) => product,
      Err(e) => {
        event!(Level::ERROR, product_id = id, error = %e, "Error getting product.");
        None
      }
    }
  }

  /// Case-insensitive substring search over name, description and category.
  /// A blank query returns the whole catalog.
  pub fn search(&self, query: &str) -> Vec<Product> {
    let query = query.trim();
    if query.is_empty() {
      return self.products();
    }
    let needle = query.to_lowercase();
    self
      .products
      .read()
      .iter()
      .filter(|p| p.matches_lowercase(&needle))
      .cloned()
      .collect()
  }

  /// Products whose category equals `category` exactly.
  pub fn by_category(&self, category: &str) -> Vec<Product> {
    self
      .products
      .read()
      .iter()
      .filter(|p| p.category == category)
      .cloned()
      .collect()
  }

  /// Distinct categories in catalog order.
  pub fn categories(&self) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for product in self.products.read().iter() {
      if !seen.contains(&product.category) {
        seen.push(product.category.clone());
      }
    }
    seen
  }
}
