mod memory;
mod postgres;

use async_trait::async_trait;

use crate::app::entity::Cliente;

pub use memory::MemoryClienteStore;
pub use postgres::PgClienteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("email {0:?} is already registered")]
    DuplicateEmail(String),
}

/// A validated insert: both fields present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCliente {
    pub nombre: String,
    pub email: String,
}

/// Everything the HTTP layer needs from storage.
#[async_trait]
pub trait ClienteStore: Send + Sync {
    /// All records, highest `id` first.
    async fn list(&self) -> Result<Vec<Cliente>, StoreError>;

    /// Inserts one record and returns it with its assigned `id` and
    /// `creado_en`. A taken email is an error and writes nothing.
    async fn insert(&self, nuevo: NewCliente) -> Result<Cliente, StoreError>;
}
