use sea_query::{
    ColumnDef, Expr, Index, IndexCreateStatement, IndexDropStatement, Table,
    TableCreateStatement, TableDropStatement,
};

use crate::table::Jam;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Jam::Table)
        .col(
            ColumnDef::new(Jam::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Jam::Status)
                .string()
                .not_null()
                .string_len(15)
                .default("active"),
        )
        .col(ColumnDef::new(Jam::EventName).string().not_null())
        .col(ColumnDef::new(Jam::EventKind).string())
        .col(ColumnDef::new(Jam::PrimaryGenre).string())
        .col(ColumnDef::new(Jam::SkillLevel).string())
        .col(ColumnDef::new(Jam::VenueName).string())
        .col(ColumnDef::new(Jam::Address).string())
        .col(ColumnDef::new(Jam::City).string())
        .col(ColumnDef::new(Jam::Region).string())
        .col(ColumnDef::new(Jam::GreaterRegion).string())
        .col(ColumnDef::new(Jam::State).string())
        .col(ColumnDef::new(Jam::DayOfWeek).string().string_len(10))
        .col(ColumnDef::new(Jam::StartTime).string().string_len(8))
        .col(ColumnDef::new(Jam::EndTime).string().string_len(8))
        .col(ColumnDef::new(Jam::RecurrenceDescription).string())
        .col(ColumnDef::new(Jam::Frequency).string())
        .col(ColumnDef::new(Jam::WeeksOfMonth).string())
        .col(ColumnDef::new(Jam::StartDate).string().string_len(10))
        .col(ColumnDef::new(Jam::EndDate).string().string_len(10))
        .col(ColumnDef::new(Jam::TimeOfDay).string())
        .col(ColumnDef::new(Jam::AvgCrowdSize).string())
        .col(ColumnDef::new(Jam::InviteStatus).string())
        .col(ColumnDef::new(Jam::CoverChargeType).string())
        .col(
            ColumnDef::new(Jam::IncludesDancing)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Jam::IsHouseJam)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Jam::IsFestival)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Jam::WebsiteUrl).string())
        .col(ColumnDef::new(Jam::ContactEmail).string())
        .col(ColumnDef::new(Jam::EventDescription).text())
        .col(ColumnDef::new(Jam::OwnerEmail).string())
        .col(
            ColumnDef::new(Jam::CreatedAt)
                .big_integer()
                .not_null()
                .default(Expr::cust("(unixepoch())")),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Jam::Table).to_owned()
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
        .name("idx_jam_status")
        .table(Jam::Table)
        .col(Jam::Status)
        .col(Jam::EventName)
        .to_owned()
}

fn drop_status_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_jam_status")
        .table(Jam::Table)
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
