use jamguide_db::table::Jam;
use jamguide_shared::{Error, bail};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::{Validate, ValidateEmail, ValidateUrl};

use super::submit::{checked_date, checked_day, checked_range, checked_time};

/// Changes to an existing listing. `None` leaves a column untouched, a blank
/// value clears an optional column.
#[derive(Debug, Default, Clone, Validate)]
pub struct UpdateJamInput {
    #[validate(length(min = 1, max = 200, message = "Event name is required"))]
    pub event_name: Option<String>,
    #[validate(length(max = 200))]
    pub venue_name: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: Option<String>,
    pub state: Option<String>,
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(length(max = 5000))]
    pub event_description: Option<String>,
    pub website_url: Option<String>,
    pub contact_email: Option<String>,
}

impl UpdateJamInput {
    pub fn is_empty(&self) -> bool {
        [
            &self.event_name,
            &self.venue_name,
            &self.address,
            &self.city,
            &self.state,
            &self.day_of_week,
            &self.start_time,
            &self.end_time,
            &self.start_date,
            &self.end_date,
            &self.event_description,
            &self.website_url,
            &self.contact_email,
        ]
        .iter()
        .all(|field| field.is_none())
    }
}

fn blank_to_none(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn required(value: &str, message: &str) -> jamguide_shared::Result<String> {
    match blank_to_none(value) {
        Some(value) => Ok(value),
        None => bail!("{message}"),
    }
}

#[derive(sqlx::FromRow)]
struct DateRange {
    start_date: Option<String>,
    end_date: Option<String>,
}

impl super::Command {
    /// Apply an edit to a listing, whatever its status.
    pub async fn update_jam(&self, id: i64, input: UpdateJamInput) -> jamguide_shared::Result<()> {
        input.validate()?;

        if input.is_empty() {
            bail!("Nothing to update");
        }

        let mut values: Vec<(Jam, Expr)> = vec![];

        if let Some(name) = input.event_name.as_deref() {
            values.push((Jam::EventName, required(name, "Event name is required")?.into()));
        }

        if let Some(city) = input.city.as_deref() {
            values.push((Jam::City, required(city, "City is required")?.into()));
        }

        let text = [
            (Jam::VenueName, &input.venue_name),
            (Jam::Address, &input.address),
            (Jam::State, &input.state),
            (Jam::EventDescription, &input.event_description),
        ];
        for (column, value) in text {
            if let Some(value) = value.as_deref() {
                values.push((column, blank_to_none(value).into()));
            }
        }

        if let Some(url) = input.website_url.as_deref() {
            let url = blank_to_none(url);
            if url.as_deref().is_some_and(|url| !url.validate_url()) {
                bail!("Website must be a full URL");
            }
            values.push((Jam::WebsiteUrl, url.into()));
        }

        if let Some(email) = input.contact_email.as_deref() {
            let email = blank_to_none(email);
            if email.as_deref().is_some_and(|email| !email.validate_email()) {
                bail!("Contact email is not valid");
            }
            values.push((Jam::ContactEmail, email.into()));
        }

        if let Some(day) = input.day_of_week.as_deref() {
            let day = checked_day(blank_to_none(day).as_deref())?;
            values.push((Jam::DayOfWeek, day.into()));
        }

        for (column, value) in [(Jam::StartTime, &input.start_time), (Jam::EndTime, &input.end_time)] {
            if let Some(value) = value.as_deref() {
                values.push((column, checked_time(Some(value))?.into()));
            }
        }

        let start_date = match input.start_date.as_deref() {
            Some(value) => Some(checked_date(blank_to_none(value).as_deref(), "Start date")?),
            None => None,
        };
        let end_date = match input.end_date.as_deref() {
            Some(value) => Some(checked_date(blank_to_none(value).as_deref(), "End date")?),
            None => None,
        };

        let mut tx = self.0.begin().await?;

        let Some(current) =
            sqlx::query_as::<_, DateRange>("SELECT start_date, end_date FROM jam WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Err(Error::NotFound);
        };

        checked_range(
            start_date.as_ref().unwrap_or(&current.start_date).as_deref(),
            end_date.as_ref().unwrap_or(&current.end_date).as_deref(),
        )?;

        if let Some(start_date) = start_date {
            values.push((Jam::StartDate, start_date.into()));
        }
        if let Some(end_date) = end_date {
            values.push((Jam::EndDate, end_date.into()));
        }

        let statement = Query::update()
            .table(Jam::Table)
            .values(values)
            .and_where(Expr::col(Jam::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(jam_id = id, "jam updated");

        Ok(())
    }
}
