// tests/store_tests.rs
mod common;
use common::*;
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;
use storefront::{CartItem, Decimal, LocalStore, MemoryEngine, StorageEngine, StoreConfig, StoreError};

fn cart_item(id: u64, product_id: u64, quantity: u32) -> CartItem {
  CartItem {
    id,
    product_id,
    quantity,
    price: Decimal::from(10),
    name: format!("Product {}", product_id),
    image: String::new(),
  }
}

#[tokio::test]
#[serial]
async fn test_concurrent_initialize_opens_engine_once() {
  setup_tracing();
  let engine = FaultyEngine::new();
  engine.stall_for(Duration::from_millis(20));
  let store = faulty_store(&engine);

  let (a, b, c) = tokio::join!(store.initialize(), store.initialize(), store.initialize());
  assert!(a.is_ok() && b.is_ok() && c.is_ok());
  assert_eq!(engine.open_calls(), 1);

  store.initialize().await.unwrap();
  assert_eq!(engine.open_calls(), 1);
  assert!(store.is_initialized());
}

#[tokio::test]
#[serial]
async fn test_initialization_failure_propagates_and_caller_may_retry() {
  setup_tracing();
  let engine = FaultyEngine::new();
  engine.fail("open");
  let store = faulty_store(&engine);

  match store.initialize().await {
    Err(StoreError::Initialization { db_name, .. }) => assert_eq!(db_name, "ShopPWADB"),
    other => panic!("Expected StoreError::Initialization, got {:?}", other),
  }
  assert!(!store.is_initialized());

  // Any operation attempts initialization and reports the same failure.
  assert!(matches!(
    store.list_products().await,
    Err(StoreError::Initialization { .. })
  ));

  engine.heal("open");
  store.initialize().await.unwrap();
  assert_eq!(engine.open_calls(), 3);
}

#[tokio::test]
#[serial]
async fn test_operations_initialize_lazily() {
  setup_tracing();
  let store = memory_store();
  assert!(!store.is_initialized());
  assert!(store.list_cart_items().await.unwrap().is_empty());
  assert!(store.is_initialized());
}

#[tokio::test]
#[serial]
async fn test_put_products_upserts_by_id() {
  setup_tracing();
  let store = memory_store();
  store
    .put_products(&[product(1, "Lamp", 1999, "Home"), product(2, "Rug", 4500, "Home")])
    .await
    .unwrap();
  store.put_products(&[product(1, "Desk Lamp", 2199, "Home")]).await.unwrap();

  let mut products = store.list_products().await.unwrap();
  products.sort_by_key(|p| p.id);
  assert_eq!(products.len(), 2);
  assert_eq!(products[0].name, "Desk Lamp");
  assert_eq!(products[0].price, Decimal::new(2199, 2));

  assert_eq!(store.get_product(2).await.unwrap().unwrap().name, "Rug");
  assert!(store.get_product(42).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_engine_errors_surface_as_storage_errors() {
  setup_tracing();
  let engine = FaultyEngine::new();
  let store = faulty_store(&engine);
  store.initialize().await.unwrap();

  engine.fail("put");
  match store.put_cart_item(&cart_item(1, 1, 1)).await {
    Err(e @ StoreError::Storage { .. }) => {
      assert!(e.is_retryable());
      assert!(e.to_string().contains("put_cart_item"));
    }
    other => panic!("Expected StoreError::Storage, got {:?}", other),
  }

  engine.fail("delete");
  assert!(matches!(
    store.delete_cart_item(1).await,
    Err(StoreError::Storage { operation: "delete_cart_item", .. })
  ));
}

#[tokio::test]
#[serial]
async fn test_stalled_engine_call_times_out() {
  setup_tracing();
  let engine = FaultyEngine::new();
  let store = faulty_store_with(&engine, StoreConfig::default().with_op_timeout(Duration::from_millis(20)));
  store.initialize().await.unwrap();

  engine.stall_for(Duration::from_millis(500));
  match store.list_cart_items().await {
    Err(StoreError::Timeout { operation, after }) => {
      assert_eq!(operation, "list_cart_items");
      assert_eq!(after, Duration::from_millis(20));
    }
    other => panic!("Expected StoreError::Timeout, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_stalled_open_is_an_initialization_error() {
  setup_tracing();
  let engine = FaultyEngine::new();
  engine.stall_for(Duration::from_millis(500));
  let store = faulty_store_with(&engine, StoreConfig::default().with_op_timeout(Duration::from_millis(20)));

  assert!(matches!(
    store.initialize().await,
    Err(StoreError::Initialization { .. })
  ));
}

#[tokio::test]
#[serial]
async fn test_set_quantity_on_missing_row_writes_nothing() {
  setup_tracing();
  let store = memory_store();
  assert!(store.set_cart_item_quantity(9, 4).await.unwrap().is_none());
  assert!(store.list_cart_items().await.unwrap().is_empty());

  store.put_cart_item(&cart_item(9, 3, 1)).await.unwrap();
  let updated = store.set_cart_item_quantity(9, 4).await.unwrap().unwrap();
  assert_eq!(updated.quantity, 4);
  assert_eq!(store.list_cart_items().await.unwrap(), vec![updated]);
}

#[tokio::test]
#[serial]
async fn test_zero_quantity_rows_are_rejected() {
  setup_tracing();
  let store = memory_store();
  assert!(matches!(
    store.put_cart_item(&cart_item(1, 1, 0)).await,
    Err(StoreError::InvalidQuantity { quantity: 0 })
  ));
  store.put_cart_item(&cart_item(1, 1, 2)).await.unwrap();
  assert!(matches!(
    store.set_cart_item_quantity(1, 0).await,
    Err(StoreError::InvalidQuantity { .. })
  ));
  assert_eq!(store.list_cart_items().await.unwrap()[0].quantity, 2);
}

#[tokio::test]
#[serial]
async fn test_delete_missing_and_clear() {
  setup_tracing();
  let store = memory_store();
  store.delete_cart_item(77).await.unwrap();

  store.put_cart_item(&cart_item(1, 1, 1)).await.unwrap();
  store.put_cart_item(&cart_item(2, 2, 1)).await.unwrap();
  store.clear_cart().await.unwrap();
  assert!(store.list_cart_items().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_cart_ids_are_monotonic_and_survive_reopen() {
  setup_tracing();
  let engine = MemoryEngine::new();
  let first = LocalStore::new(Arc::new(engine.clone()), StoreConfig::default());

  let a = first.next_cart_item_id().await.unwrap();
  let b = first.next_cart_item_id().await.unwrap();
  assert!(b > a);
  first.put_cart_item(&cart_item(b, 1, 1)).await.unwrap();
  // An externally chosen id is never reissued either.
  first.put_cart_item(&cart_item(40, 2, 1)).await.unwrap();
  assert_eq!(first.next_cart_item_id().await.unwrap(), 41);

  let reopened = LocalStore::new(Arc::new(engine), StoreConfig::default());
  assert_eq!(reopened.next_cart_item_id().await.unwrap(), 41);
}

#[tokio::test]
#[serial]
async fn test_undecodable_rows_are_reported_as_corrupt() {
  setup_tracing();
  let engine = FaultyEngine::new();
  let store = faulty_store(&engine);
  store.initialize().await.unwrap();

  engine
    .inner()
    .put("cart", 5, json!({"id": 5, "bogus": true}))
    .await
    .unwrap();

  match store.list_cart_items().await {
    Err(StoreError::Corrupt { collection, .. }) => assert_eq!(collection, "cart"),
    other => panic!("Expected StoreError::Corrupt, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_cart_ids_never_wrap_after_the_largest_id() {
  setup_tracing();
  let store = memory_store();
  store.put_cart_item(&cart_item(u64::MAX, 1, 1)).await.unwrap();

  for _ in 0..2 {
    assert!(matches!(
      store.next_cart_item_id().await,
      Err(StoreError::IdsExhausted { collection: "cart" })
    ));
  }
}
