use sea_query::{
    ColumnDef, Expr, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement,
    IndexDropStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Jam, JamReview};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(JamReview::Table)
        .col(
            ColumnDef::new(JamReview::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(JamReview::JamId).integer().not_null())
        .col(ColumnDef::new(JamReview::DisplayName).string().string_len(60))
        .col(ColumnDef::new(JamReview::Comments).text())
        .col(ColumnDef::new(JamReview::OverallRating).tiny_integer())
        .col(ColumnDef::new(JamReview::NetworkingRating).tiny_integer())
        .col(ColumnDef::new(JamReview::InfoAccuracyRating).tiny_integer())
        .col(ColumnDef::new(JamReview::Happened).boolean())
        .col(
            ColumnDef::new(JamReview::CreatedAt)
                .big_integer()
                .not_null()
                .default(Expr::cust("(unixepoch())")),
        )
        .foreign_key(
            ForeignKey::create()
                .from(JamReview::Table, JamReview::JamId)
                .to(Jam::Table, Jam::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(JamReview::Table).to_owned()
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

pub struct CreateJamIdx;

fn create_jam_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_jam_review_jam_id")
        .table(JamReview::Table)
        .col(JamReview::JamId)
        .to_owned()
}

fn drop_jam_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_jam_review_jam_id")
        .table(JamReview::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateJamIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_jam_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_jam_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
