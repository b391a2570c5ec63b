use jamguide_db::table::Jam;
use jamguide_shared::Error;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::JamStatus;

impl super::Command {
    /// Publish, hold back or reject a listing.
    pub async fn set_status(&self, id: i64, status: JamStatus) -> jamguide_shared::Result<()> {
        let statement = Query::update()
            .table(Jam::Table)
            .values([(Jam::Status, status.to_string().into())])
            .and_where(Expr::col(Jam::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let affected = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(Error::NotFound);
        }

        tracing::info!(jam_id = id, status = %status, "jam status changed");

        Ok(())
    }
}
