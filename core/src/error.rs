// storefront/src/error.rs
use anyhow::Error as AnyhowError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  /// The engine refused to open or create the database. Every later
  /// operation will try to initialize again.
  #[error("Failed to initialize database '{db_name}'. Source: {source}")]
  Initialization {
    db_name: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Storage operation '{operation}' failed. Source: {source}")]
  Storage {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },

  #[error("Storage operation '{operation}' did not complete within {after:?}")]
  Timeout { operation: &'static str, after: Duration },

  #[error("Record in collection '{collection}' could not be (de)serialized. Source: {source}")]
  Corrupt {
    collection: &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("Quantity {quantity} is not valid for a cart item")]
  InvalidQuantity { quantity: i64 },

  #[error("No ids left to allocate in collection '{collection}'")]
  IdsExhausted { collection: &'static str },
}

impl StoreError {
  /// Whether retrying the same call could succeed without any other change.
  pub fn is_retryable(&self) -> bool {
    matches!(
      self,
      StoreError::Initialization { .. } | StoreError::Storage { .. } | StoreError::Timeout { .. }
    )
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
