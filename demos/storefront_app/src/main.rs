// storefront_app/src/main.rs

// Declare modules for the application
mod commands;
mod config;
mod errors;
mod services;
mod state;

use crate::commands::{Command, USAGE};
use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::state::AppState;

use std::sync::Arc;
use storefront::{FileEngine, LocalStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
  // Logs go to stderr so command output stays clean; RUST_LOG overrides.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  if let Err(e) = run().await {
    tracing::error!(error = %e, "Command failed.");
    eprintln!("{}", e);
    if matches!(e, errors::AppError::Usage(_)) {
      eprintln!("{}", USAGE);
    }
    std::process::exit(e.exit_code());
  }
}

async fn run() -> AppResult<()> {
  let args: Vec<String> = std::env::args().skip(1).collect();
  let command = Command::parse(&args)?;

  let app_config = Arc::new(AppConfig::from_env()?);

  let engine = FileEngine::new(app_config.store_dir.clone());
  let store = Arc::new(LocalStore::new(Arc::new(engine), app_config.store_config()));
  store.initialize().await?;

  let app_state = AppState::new(store, app_config);
  let count = app_state.catalog.load().await?;
  app_state.cart.load().await?;
  tracing::info!(store = ?app_state.store, products = count, cart_lines = app_state.cart.len(), "Storefront ready.");

  commands::dispatch(&app_state, command).await
}
