// storefront/src/store/config.rs

use std::time::Duration;

pub const DEFAULT_DB_NAME: &str = "ShopPWADB";
pub const DEFAULT_DB_VERSION: u32 = 1;
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub db_name: String,
  pub version: u32,
  /// Upper bound on any single engine call, including the initial open.
  pub op_timeout: Duration,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      db_name: DEFAULT_DB_NAME.to_string(),
      version: DEFAULT_DB_VERSION,
      op_timeout: DEFAULT_OP_TIMEOUT,
    }
  }
}

impl StoreConfig {
  pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
    self.db_name = db_name.into();
    self
  }

  pub fn with_version(mut self, version: u32) -> Self {
    self.version = version;
    self
  }

  pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
    self.op_timeout = op_timeout;
    self
  }
}
