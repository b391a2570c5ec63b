use jamguide_db::table::{Jam, JamClaim};
use jamguide_shared::{Error, bail};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use crate::{ClaimStatus, JamStatus};

#[derive(Debug, Clone, Validate)]
pub struct ClaimJamInput {
    pub jam_id: i64,
    #[validate(email(message = "Email is not valid"))]
    pub claimant_email: String,
    #[validate(length(min = 7, max = 30, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ClaimState {
    jam_id: i64,
    claimant_email: String,
    status: sqlx::types::Text<ClaimStatus>,
}

impl super::Command {
    /// File an ownership claim. It stays pending until an admin decides.
    pub async fn claim(&self, input: ClaimJamInput) -> jamguide_shared::Result<i64> {
        input.validate()?;

        let mut tx = self.0.begin().await?;

        let owner = sqlx::query_scalar::<_, Option<String>>(
            "SELECT owner_email FROM jam WHERE id = ?1 AND status = ?2",
        )
        .bind(input.jam_id)
        .bind(JamStatus::Active.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        match owner {
            None => return Err(Error::NotFound),
            Some(Some(_)) => bail!("This jam already has an owner"),
            Some(None) => {}
        }

        let statement = Query::select()
            .column(JamClaim::Id)
            .from(JamClaim::Table)
            .and_where(Expr::col(JamClaim::JamId).eq(input.jam_id))
            .and_where(Expr::col(JamClaim::ClaimantEmail).eq(input.claimant_email.to_owned()))
            .and_where(Expr::col(JamClaim::Status).eq(ClaimStatus::Pending.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if sqlx::query_with(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .is_some()
        {
            bail!("You already have a pending claim for this jam");
        }

        let statement = Query::insert()
            .into_table(JamClaim::Table)
            .columns([
                JamClaim::JamId,
                JamClaim::ClaimantEmail,
                JamClaim::PhoneNumber,
                JamClaim::Notes,
                JamClaim::Status,
                JamClaim::CreatedAt,
            ])
            .values_panic([
                input.jam_id.into(),
                input.claimant_email.into(),
                input.phone_number.into(),
                input.notes.into(),
                ClaimStatus::Pending.to_string().into(),
                super::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        tx.commit().await?;

        tracing::info!(jam_id = input.jam_id, claim_id = id, "claim filed");

        Ok(id)
    }

    /// Approve a pending claim and hand the jam to the claimant.
    pub async fn approve_claim(&self, id: i64) -> jamguide_shared::Result<()> {
        let mut tx = self.0.begin().await?;

        let Some(claim) = sqlx::query_as::<_, ClaimState>(
            "SELECT jam_id, claimant_email, status FROM jam_claim WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Err(Error::NotFound);
        };

        if claim.status.0 != ClaimStatus::Pending {
            bail!("Claim {id} is already {}", claim.status.0);
        }

        let owner = sqlx::query_scalar::<_, Option<String>>(
            "SELECT owner_email FROM jam WHERE id = ?1",
        )
        .bind(claim.jam_id)
        .fetch_optional(&mut *tx)
        .await?
        .flatten();

        if owner.is_some_and(|owner| owner != claim.claimant_email) {
            bail!("Jam {} already has an owner", claim.jam_id);
        }

        let statement = Query::update()
            .table(JamClaim::Table)
            .values([(JamClaim::Status, ClaimStatus::Approved.to_string().into())])
            .and_where(Expr::col(JamClaim::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::update()
            .table(Jam::Table)
            .values([(Jam::OwnerEmail, claim.claimant_email.to_owned().into())])
            .and_where(Expr::col(Jam::Id).eq(claim.jam_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(claim_id = id, jam_id = claim.jam_id, "claim approved");

        Ok(())
    }

    pub async fn reject_claim(&self, id: i64) -> jamguide_shared::Result<()> {
        let statement = Query::update()
            .table(JamClaim::Table)
            .values([(JamClaim::Status, ClaimStatus::Rejected.to_string().into())])
            .and_where(Expr::col(JamClaim::Id).eq(id))
            .and_where(Expr::col(JamClaim::Status).eq(ClaimStatus::Pending.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let affected = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .rows_affected();

        if affected == 0 {
            let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM jam_claim WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.0)
                .await?
                .is_some();

            if !exists {
                return Err(Error::NotFound);
            }

            bail!("Claim {id} is no longer pending");
        }

        tracing::info!(claim_id = id, "claim rejected");

        Ok(())
    }
}
