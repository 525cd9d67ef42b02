use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};

use super::{ClienteStore, NewCliente, StoreError};
use crate::app::entity::{Cliente, cliente};

/// `ClienteStore` over the sea-orm connection pool. Uniqueness of `email`
/// is left to the table constraint.
#[derive(Clone)]
pub struct PgClienteStore {
    db: DatabaseConnection,
}

impl PgClienteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        PgClienteStore { db }
    }
}

#[async_trait]
impl ClienteStore for PgClienteStore {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn list(&self) -> Result<Vec<Cliente>, StoreError> {
        let clientes = cliente::Entity::find()
            .order_by_desc(cliente::Column::Id)
            .all(&self.db)
            .await?;

        Ok(clientes)
    }

    #[tracing::instrument(level = "debug", skip(self, nuevo))]
    async fn insert(&self, nuevo: NewCliente) -> Result<Cliente, StoreError> {
        let cliente = cliente::ActiveModel {
            nombre: Set(nuevo.nombre),
            email: Set(nuevo.email),
            ..Default::default()
        };

        Ok(cliente.insert(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    fn row(id: i32, email: &str) -> Cliente {
        Cliente {
            id,
            nombre: format!("cliente {id}"),
            email: email.into(),
            creado_en: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|date| date.and_hms_opt(10, 0, id as u32))
                .unwrap(),
        }
    }

    fn nuevo(email: &str) -> NewCliente {
        NewCliente {
            nombre: "Ana".into(),
            email: email.into(),
        }
    }

    fn logged_sql(db: DatabaseConnection) -> Vec<String> {
        db.into_transaction_log()
            .iter()
            .flat_map(|transaction| transaction.statements().iter().map(|stmt| stmt.sql.clone()))
            .collect()
    }

    #[tokio::test]
    async fn list_orders_by_id_descending() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(2, "b@x.io"), row(1, "a@x.io")]])
            .into_connection();
        let store = PgClienteStore::new(db.clone());

        let clientes = store.list().await.unwrap();
        drop(store);

        assert_eq!(clientes.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1]);

        let sql = logged_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].starts_with("SELECT"), "{}", sql[0]);
        assert!(sql[0].contains(r#"ORDER BY "clientes"."id" DESC"#), "{}", sql[0]);
    }

    #[tokio::test]
    async fn insert_returns_the_stored_row() {
        let stored = row(7, "ana@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let store = PgClienteStore::new(db.clone());

        let cliente = store.insert(nuevo("ana@example.com")).await.unwrap();
        drop(store);

        assert_eq!(cliente, stored);

        let sql = logged_sql(db);
        assert!(sql[0].starts_with(r#"INSERT INTO "clientes""#), "{}", sql[0]);
        assert!(sql[0].contains("RETURNING"), "{}", sql[0]);
        assert!(!sql[0].contains(r#""creado_en") VALUES"#), "{}", sql[0]);
    }

    #[tokio::test]
    async fn database_errors_surface_as_store_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([
                DbErr::Custom("duplicate key value violates unique constraint".into()),
                DbErr::Custom("connection reset".into()),
            ])
            .into_connection();
        let store = PgClienteStore::new(db);

        let insert = store.insert(nuevo("ana@example.com")).await.unwrap_err();
        let list = store.list().await.unwrap_err();

        assert!(matches!(insert, StoreError::Database(_)));
        assert!(matches!(list, StoreError::Database(_)));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn insert_span_does_not_record_email() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NEW)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "ana@example.com")]])
            .into_connection();
        PgClienteStore::new(db).insert(nuevo("ana@example.com")).await.unwrap();

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("insert"), "{output}");
        assert!(!output.contains("ana@example.com"), "{output}");
    }
}
