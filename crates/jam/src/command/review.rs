use jamguide_db::table::{Jam, JamReview};
use jamguide_shared::Error;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use crate::{Happened, JamStatus};

#[derive(Debug, Clone, Validate)]
pub struct AddReviewInput {
    pub jam_id: i64,
    #[validate(length(max = 60, message = "Display name must be at most 60 characters"))]
    pub display_name: Option<String>,
    #[validate(length(max = 2000, message = "Comments must be at most 2000 characters"))]
    pub comments: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub overall_rating: i64,
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub networking_rating: i64,
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub info_accuracy_rating: i64,
    pub happened: Happened,
}

impl super::Command {
    pub async fn add_review(&self, input: AddReviewInput) -> jamguide_shared::Result<i64> {
        input.validate()?;

        let statement = Query::select()
            .column(Jam::Id)
            .from(Jam::Table)
            .and_where(Expr::col(Jam::Id).eq(input.jam_id))
            .and_where(Expr::col(Jam::Status).eq(JamStatus::Active.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let exists = sqlx::query_with(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .is_some();

        if !exists {
            return Err(Error::NotFound);
        }

        let statement = Query::insert()
            .into_table(JamReview::Table)
            .columns([
                JamReview::JamId,
                JamReview::DisplayName,
                JamReview::Comments,
                JamReview::OverallRating,
                JamReview::NetworkingRating,
                JamReview::InfoAccuracyRating,
                JamReview::Happened,
                JamReview::CreatedAt,
            ])
            .values_panic([
                input.jam_id.into(),
                input.display_name.into(),
                input.comments.into(),
                input.overall_rating.into(),
                input.networking_rating.into(),
                input.info_accuracy_rating.into(),
                input.happened.to_flag().into(),
                super::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        tracing::info!(jam_id = input.jam_id, review_id = id, "review added");

        Ok(id)
    }
}
