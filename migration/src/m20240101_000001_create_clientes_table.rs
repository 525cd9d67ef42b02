use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `clientes` DDL. Guarded with `IF NOT EXISTS` so a table created before
/// migrations were tracked is adopted as-is.
pub fn create_clientes_table() -> TableCreateStatement {
    Table::create()
        .table("clientes")
        .if_not_exists()
        .col(pk_auto("id"))
        .col(string_len("nombre", 100))
        .col(string_len_uniq("email", 100))
        .col(timestamp("creado_en").default(Expr::current_timestamp()))
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_clientes_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("clientes").to_owned())
            .await
    }
}
