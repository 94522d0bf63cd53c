// storefront_app/src/errors.rs

use storefront::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Usage Error: {0}")]
  Usage(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Checkout Error: {0}")]
  Checkout(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Store Error: {source}")]
  Store {
    #[from]
    source: StoreError,
  },
}

impl AppError {
  /// Process exit code for the CLI.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Usage(_) => 2,
      AppError::NotFound(_) => 3,
      AppError::Checkout(_) => 4,
      AppError::Config(_) => 78,
      AppError::Store { .. } => 1,
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
