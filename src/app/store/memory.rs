use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ClienteStore, NewCliente, StoreError};
use crate::app::entity::Cliente;

/// Process-local `ClienteStore`. Same contract as the Postgres store:
/// increasing ids, unique emails, newest first.
#[derive(Debug, Default)]
pub struct MemoryClienteStore {
    rows: RwLock<Vec<Cliente>>,
}

#[async_trait]
impl ClienteStore for MemoryClienteStore {
    async fn list(&self) -> Result<Vec<Cliente>, StoreError> {
        let rows = self.rows.read().await;

        Ok(rows.iter().rev().cloned().collect())
    }

    async fn insert(&self, nuevo: NewCliente) -> Result<Cliente, StoreError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|row| row.email == nuevo.email) {
            return Err(StoreError::DuplicateEmail(nuevo.email));
        }

        // rows are never removed, so the last id is the highest
        let id = rows.last().map_or(1, |row| row.id + 1);
        let cliente = Cliente {
            id,
            nombre: nuevo.nombre,
            email: nuevo.email,
            creado_en: Utc::now().naive_utc(),
        };

        rows.push(cliente.clone());

        Ok(cliente)
    }
}
