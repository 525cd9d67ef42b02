use std::{sync::Arc, time::Duration};

use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{
    app::store::{ClienteStore, MemoryClienteStore, PgClienteStore},
    config::{DatabaseConfig, StorageConfig},
};

/// Builds the store selected by configuration. For Postgres this opens the
/// pool and ensures the schema before returning.
pub async fn init_storage(config: &StorageConfig) -> anyhow::Result<Arc<dyn ClienteStore>> {
    match config {
        StorageConfig::Memory => {
            tracing::warn!("using in-memory storage, records are lost on exit");

            Ok(Arc::new(MemoryClienteStore::default()))
        }
        StorageConfig::Postgres(database) => {
            let db = connect(database).await?;
            ensure_schema(&db).await?;

            Ok(Arc::new(PgClienteStore::new(db)))
        }
    }
}

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.connection_url()?);
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .with_context(|| format!("cannot connect to database `{}`", config.target()))?;

    tracing::info!("connected to database `{}`", config.target());

    Ok(db)
}

/// Creates the `clientes` table if it does not exist. Safe on every start.
pub async fn ensure_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(db, None)
        .await
        .context("cannot initialize database schema")?;

    tracing::info!("database schema ready");

    Ok(())
}
