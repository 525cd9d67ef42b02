mod database;
mod env;
mod server;
mod tracing;

use clientes_core::config::ConfigBuilder;

use crate::{app::state::AppState, config::AppConfig};

pub use database::init_storage;
pub use server::init_server;

pub async fn init_base() {
    env::init_env().await;
    tracing::init_tracing().await;
}

/// Startup sequence: configuration, storage bootstrap, then HTTP.
///
/// Any error before the listener is bound aborts startup; no request is
/// served against a store whose schema was not ensured.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::build()?;

    let store = init_storage(&config.storage).await?;
    let state = AppState::new(&config.service_name, store);

    init_server(config.port, state).await
}
