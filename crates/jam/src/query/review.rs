use jamguide_db::table::JamReview;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::{OffsetDateTime, macros::format_description};

use crate::{Happened, ReviewScores};

#[derive(Debug, Default, Clone, FromRow)]
pub struct JamReviewRow {
    pub id: i64,
    pub jam_id: i64,
    pub display_name: Option<String>,
    pub comments: Option<String>,
    pub overall_rating: Option<i64>,
    pub networking_rating: Option<i64>,
    pub info_accuracy_rating: Option<i64>,
    pub happened: Option<bool>,
    pub created_at: i64,
}

impl JamReviewRow {
    pub fn scores(&self) -> ReviewScores {
        ReviewScores {
            overall: self.overall_rating,
            networking: self.networking_rating,
            info_accuracy: self.info_accuracy_rating,
            happened: self.happened,
        }
    }

    pub fn author(&self) -> &str {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "Anonymous",
        }
    }

    pub fn happened_label(&self) -> &'static str {
        Happened::from_flag(self.happened).label()
    }

    /// `Nov 20, 2025`, empty when the timestamp is out of range.
    pub fn created_on(&self) -> String {
        let format = format_description!("[month repr:short] [day padding:none], [year]");

        OffsetDateTime::from_unix_timestamp(self.created_at)
            .ok()
            .and_then(|dt| dt.format(format).ok())
            .unwrap_or_default()
    }
}

impl super::Query {
    /// Reviews of a jam, newest first.
    pub async fn reviews(&self, jam_id: i64) -> anyhow::Result<Vec<JamReviewRow>> {
        let statement = sea_query::Query::select()
            .columns([
                JamReview::Id,
                JamReview::JamId,
                JamReview::DisplayName,
                JamReview::Comments,
                JamReview::OverallRating,
                JamReview::NetworkingRating,
                JamReview::InfoAccuracyRating,
                JamReview::Happened,
                JamReview::CreatedAt,
            ])
            .from(JamReview::Table)
            .and_where(Expr::col(JamReview::JamId).eq(jam_id))
            .order_by_expr(Expr::col(JamReview::CreatedAt), sea_query::Order::Desc)
            .order_by_expr(Expr::col(JamReview::Id), sea_query::Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, JamReviewRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
