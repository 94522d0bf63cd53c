// storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use storefront::StoreConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Directory holding the JSON database file.
  pub store_dir: PathBuf,
  pub store_db_name: String,
  pub store_op_timeout: Duration,

  // Mock checkout
  pub checkout_delay: Duration,

  /// Seed the catalog with reference products when it is empty.
  pub seed_catalog: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let store_dir = env::var("STORE_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(".storefront"));
    let store_db_name = env::var("STORE_DB_NAME").unwrap_or_else(|_| storefront::store::config::DEFAULT_DB_NAME.to_string());
    let store_op_timeout = Duration::from_millis(parse_var("STORE_OP_TIMEOUT_MS", 5_000u64)?);
    let checkout_delay = Duration::from_millis(parse_var("CHECKOUT_DELAY_MS", 2_000u64)?);
    let seed_catalog = parse_var("SEED_CATALOG", true)?;

    if store_db_name.trim().is_empty() {
      return Err(AppError::Config("STORE_DB_NAME must not be blank".to_string()));
    }

    tracing::debug!(store_dir = %store_dir.display(), db_name = %store_db_name, "Application configuration loaded.");

    Ok(Self {
      store_dir,
      store_db_name,
      store_op_timeout,
      checkout_delay,
      seed_catalog,
    })
  }

  pub fn store_config(&self) -> StoreConfig {
    StoreConfig::default()
      .with_db_name(self.store_db_name.clone())
      .with_op_timeout(self.store_op_timeout)
  }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e))),
    Err(_) => Ok(default),
  }
}
