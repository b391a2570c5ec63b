use sea_query::{
    ColumnDef, Expr, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement,
    IndexDropStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Jam, JamClaim};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(JamClaim::Table)
        .col(
            ColumnDef::new(JamClaim::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(JamClaim::JamId).integer().not_null())
        .col(ColumnDef::new(JamClaim::ClaimantEmail).string().not_null())
        .col(ColumnDef::new(JamClaim::PhoneNumber).string().string_len(30))
        .col(ColumnDef::new(JamClaim::Notes).text())
        .col(
            ColumnDef::new(JamClaim::Status)
                .string()
                .not_null()
                .string_len(15)
                .default("pending"),
        )
        .col(
            ColumnDef::new(JamClaim::CreatedAt)
                .big_integer()
                .not_null()
                .default(Expr::cust("(unixepoch())")),
        )
        .foreign_key(
            ForeignKey::create()
                .from(JamClaim::Table, JamClaim::JamId)
                .to(Jam::Table, Jam::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(JamClaim::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateStatusIdx;

fn create_status_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_jam_claim_status")
        .table(JamClaim::Table)
        .col(JamClaim::Status)
        .to_owned()
}

fn drop_status_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_jam_claim_status")
        .table(JamClaim::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateStatusIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_status_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_status_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
