use jamguide_db::table::Jam;
use jamguide_shared::bail;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use crate::{
    JamStatus, day_key, parse_date, parse_day_of_week, parse_time_to_db, parse_weeks_of_month,
};

/// A new listing. Optional text fields are `None` when left blank.
#[derive(Debug, Default, Clone, Validate)]
pub struct SubmitJamInput {
    #[validate(length(min = 1, max = 200, message = "Event name is required"))]
    pub event_name: String,
    pub event_kind: Option<String>,
    pub primary_genre: Option<String>,
    pub skill_level: Option<String>,
    #[validate(length(max = 200))]
    pub venue_name: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "Region is required"))]
    pub region: String,
    pub greater_region: Option<String>,
    pub state: Option<String>,
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(length(max = 300))]
    pub recurrence_description: Option<String>,
    pub frequency: Option<String>,
    pub weeks_of_month: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub time_of_day: Option<String>,
    pub avg_crowd_size: Option<String>,
    pub invite_status: Option<String>,
    pub cover_charge_type: Option<String>,
    pub includes_dancing: bool,
    pub is_house_jam: bool,
    pub is_festival: bool,
    #[validate(url(message = "Website must be a full URL"))]
    pub website_url: Option<String>,
    #[validate(email(message = "Contact email is not valid"))]
    pub contact_email: Option<String>,
    #[validate(length(max = 5000))]
    pub event_description: Option<String>,
}

impl super::Command {
    /// Store a submission and return its id.
    pub async fn submit(
        &self,
        input: SubmitJamInput,
        status: JamStatus,
    ) -> jamguide_shared::Result<i64> {
        input.validate()?;

        let day_of_week = checked_day(input.day_of_week.as_deref())?;
        let start_time = checked_time(input.start_time.as_deref())?;
        let end_time = checked_time(input.end_time.as_deref())?;
        let start_date = checked_date(input.start_date.as_deref(), "Start date")?;
        let end_date = checked_date(input.end_date.as_deref(), "End date")?;
        checked_range(start_date.as_deref(), end_date.as_deref())?;

        let weeks_of_month = input
            .weeks_of_month
            .as_deref()
            .map(parse_weeks_of_month)
            .filter(|weeks| !weeks.is_empty())
            .map(|weeks| {
                weeks
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            });

        let frequency = input.frequency.map(|f| f.trim().to_lowercase());

        let statement = Query::insert()
            .into_table(Jam::Table)
            .columns([
                Jam::Status,
                Jam::EventName,
                Jam::EventKind,
                Jam::PrimaryGenre,
                Jam::SkillLevel,
                Jam::VenueName,
                Jam::Address,
                Jam::City,
                Jam::Region,
                Jam::GreaterRegion,
                Jam::State,
                Jam::DayOfWeek,
                Jam::StartTime,
                Jam::EndTime,
                Jam::RecurrenceDescription,
                Jam::Frequency,
                Jam::WeeksOfMonth,
                Jam::StartDate,
                Jam::EndDate,
                Jam::TimeOfDay,
                Jam::AvgCrowdSize,
                Jam::InviteStatus,
                Jam::CoverChargeType,
                Jam::IncludesDancing,
                Jam::IsHouseJam,
                Jam::IsFestival,
                Jam::WebsiteUrl,
                Jam::ContactEmail,
                Jam::EventDescription,
                Jam::CreatedAt,
            ])
            .values_panic([
                status.to_string().into(),
                input.event_name.trim().to_owned().into(),
                input.event_kind.into(),
                input.primary_genre.into(),
                input.skill_level.into(),
                input.venue_name.into(),
                input.address.into(),
                input.city.trim().to_owned().into(),
                input.region.trim().to_owned().into(),
                input.greater_region.into(),
                input.state.into(),
                day_of_week.into(),
                start_time.into(),
                end_time.into(),
                input.recurrence_description.into(),
                frequency.into(),
                weeks_of_month.into(),
                start_date.into(),
                end_date.into(),
                input.time_of_day.into(),
                input.avg_crowd_size.into(),
                input.invite_status.into(),
                input.cover_charge_type.into(),
                input.includes_dancing.into(),
                input.is_house_jam.into(),
                input.is_festival.into(),
                input.website_url.into(),
                input.contact_email.into(),
                input.event_description.into(),
                super::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        tracing::info!(jam_id = id, status = %status, "jam submitted");

        Ok(id)
    }
}

pub(super) fn checked_day(value: Option<&str>) -> jamguide_shared::Result<Option<String>> {
    let Some(day) = value else {
        return Ok(None);
    };

    match parse_day_of_week(day) {
        Some(weekday) => Ok(Some(day_key(weekday).to_owned())),
        None => bail!("Unknown day of week `{day}`"),
    }
}

pub(super) fn checked_time(value: Option<&str>) -> jamguide_shared::Result<Option<String>> {
    match value.map(parse_time_to_db) {
        Some(Ok(time)) => Ok(time),
        Some(Err(err)) => bail!("{err}"),
        None => Ok(None),
    }
}

pub(super) fn checked_date(
    value: Option<&str>,
    field: &str,
) -> jamguide_shared::Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };

    match parse_date(value) {
        Some(_) => Ok(Some(value.trim().to_owned())),
        None => bail!("{field} must be formatted as YYYY-MM-DD"),
    }
}

pub(super) fn checked_range(start: Option<&str>, end: Option<&str>) -> jamguide_shared::Result<()> {
    if let (Some(start), Some(end)) = (start.and_then(parse_date), end.and_then(parse_date))
        && end < start
    {
        bail!("End date must not be before start date");
    }

    Ok(())
}
