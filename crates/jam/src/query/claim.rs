use jamguide_db::table::{Jam, JamClaim};
use sea_query::{Expr, ExprTrait, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::ClaimStatus;

#[derive(Debug, Default, Clone, FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub jam_id: i64,
    pub event_name: String,
    pub claimant_email: String,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
    pub status: sqlx::types::Text<ClaimStatus>,
    pub created_at: i64,
}

impl ClaimRow {
    pub fn is_pending(&self) -> bool {
        self.status.0 == ClaimStatus::Pending
    }
}

fn select_claims() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            (JamClaim::Table, JamClaim::Id),
            (JamClaim::Table, JamClaim::JamId),
            (JamClaim::Table, JamClaim::ClaimantEmail),
            (JamClaim::Table, JamClaim::PhoneNumber),
            (JamClaim::Table, JamClaim::Notes),
            (JamClaim::Table, JamClaim::Status),
            (JamClaim::Table, JamClaim::CreatedAt),
        ])
        .column((Jam::Table, Jam::EventName))
        .from(JamClaim::Table)
        .join(
            sea_query::JoinType::InnerJoin,
            Jam::Table,
            Expr::col((Jam::Table, Jam::Id)).equals((JamClaim::Table, JamClaim::JamId)),
        )
        .to_owned()
}

impl super::Query {
    /// Ownership claims, oldest first, optionally narrowed to one status.
    pub async fn claims(&self, status: Option<ClaimStatus>) -> anyhow::Result<Vec<ClaimRow>> {
        let mut statement = select_claims();

        if let Some(status) = status {
            statement.and_where(Expr::col((JamClaim::Table, JamClaim::Status)).eq(status.to_string()));
        }

        statement
            .order_by_expr(
                Expr::col((JamClaim::Table, JamClaim::CreatedAt)),
                sea_query::Order::Asc,
            )
            .order_by_expr(Expr::col((JamClaim::Table, JamClaim::Id)), sea_query::Order::Asc);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ClaimRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_claim(&self, id: i64) -> anyhow::Result<Option<ClaimRow>> {
        let statement = select_claims()
            .and_where(Expr::col((JamClaim::Table, JamClaim::Id)).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ClaimRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
