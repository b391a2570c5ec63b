use jamguide_db::table::Jam;
use sea_query::{Expr, ExprTrait, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::{
    Frequency, JamFilter, JamStatus, RawSchedule, Schedule, Scheduled, is_notable, short_time,
};

#[derive(Debug, Default, Clone, FromRow)]
pub struct JamRow {
    pub id: i64,
    pub status: sqlx::types::Text<JamStatus>,
    pub event_name: String,
    pub event_kind: Option<String>,
    pub primary_genre: Option<String>,
    pub skill_level: Option<String>,
    pub venue_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub greater_region: Option<String>,
    pub state: Option<String>,
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
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
    pub website_url: Option<String>,
    pub contact_email: Option<String>,
    pub event_description: Option<String>,
    pub owner_email: Option<String>,
    pub created_at: i64,
}

impl JamRow {
    pub fn name(&self) -> &str {
        match self.event_name.trim() {
            "" => "Untitled event",
            name => name,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.0 == JamStatus::Active
    }

    pub fn is_pending(&self) -> bool {
        self.status.0 == JamStatus::Pending
    }

    pub fn is_claimed(&self) -> bool {
        self.owner_email.is_some()
    }

    pub fn is_notable(&self) -> bool {
        is_notable(
            Some(&self.event_name),
            self.venue_name.as_deref(),
            self.city.as_deref(),
        )
    }

    /// `City • Region • Venue`, skipping missing parts.
    pub fn location(&self) -> String {
        [&self.city, &self.region, &self.venue_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }

    pub fn when(&self) -> String {
        let day = self.day_of_week.as_deref().unwrap_or_default();

        match self.recurrence_description.as_deref() {
            Some(desc) if !desc.trim().is_empty() && !day.is_empty() => format!("{day} • {desc}"),
            Some(desc) if !desc.trim().is_empty() => desc.to_owned(),
            _ => day.to_owned(),
        }
    }

    pub fn start_time_short(&self) -> &str {
        self.start_time.as_deref().map(short_time).unwrap_or_default()
    }

    pub fn end_time_short(&self) -> &str {
        self.end_time.as_deref().map(short_time).unwrap_or_default()
    }

    pub fn frequency_label(&self) -> &'static str {
        Frequency::parse(self.frequency.as_deref().unwrap_or_default()).label()
    }

    pub fn tags(&self) -> String {
        [&self.primary_genre, &self.skill_level, &self.event_kind]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

impl Scheduled for JamRow {
    fn schedule(&self) -> Schedule {
        Schedule::from(RawSchedule {
            frequency: self.frequency.as_deref(),
            day_of_week: self.day_of_week.as_deref(),
            start_date: self.start_date.as_deref(),
            end_date: self.end_date.as_deref(),
            weeks_of_month: self.weeks_of_month.as_deref(),
            is_festival: self.is_festival,
        })
    }
}

fn select_jams() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            Jam::Id,
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
            Jam::OwnerEmail,
            Jam::CreatedAt,
        ])
        .from(Jam::Table)
        .to_owned()
}

fn and_where_in(statement: &mut SelectStatement, column: Jam, values: &[String]) {
    if values.is_empty() {
        return;
    }

    statement.and_where(Expr::col(column).is_in(values.iter().cloned()));
}

impl super::Query {
    /// Active jams matching every non-empty axis of `filter`, by event name.
    pub async fn filter(&self, filter: &JamFilter) -> anyhow::Result<Vec<JamRow>> {
        let mut statement = select_jams()
            .and_where(Expr::col(Jam::Status).eq(JamStatus::Active.to_string()))
            .to_owned();

        and_where_in(&mut statement, Jam::Region, &filter.regions);
        and_where_in(&mut statement, Jam::City, &filter.cities);
        and_where_in(&mut statement, Jam::GreaterRegion, &filter.greater_regions);
        and_where_in(&mut statement, Jam::DayOfWeek, &filter.days);
        and_where_in(&mut statement, Jam::TimeOfDay, &filter.times_of_day);
        and_where_in(&mut statement, Jam::PrimaryGenre, &filter.genres);
        and_where_in(&mut statement, Jam::SkillLevel, &filter.skills);
        and_where_in(&mut statement, Jam::InviteStatus, &filter.invite);
        and_where_in(&mut statement, Jam::AvgCrowdSize, &filter.crowd);
        and_where_in(&mut statement, Jam::CoverChargeType, &filter.cover_types);
        and_where_in(&mut statement, Jam::EventKind, &filter.kinds);
        and_where_in(&mut statement, Jam::Frequency, &filter.frequencies);

        if filter.house_jam_only {
            statement.and_where(Expr::col(Jam::IsHouseJam).eq(true));
        }

        if filter.dancing_only {
            statement.and_where(Expr::col(Jam::IncludesDancing).eq(true));
        }

        statement.order_by_expr(Expr::col(Jam::EventName), sea_query::Order::Asc);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut rows = sqlx::query_as_with::<_, JamRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        if filter.notable_only {
            rows.retain(JamRow::is_notable);
        }

        Ok(rows)
    }

    /// Every active jam, earliest start time first, for the calendar.
    pub async fn active(&self) -> anyhow::Result<Vec<JamRow>> {
        let statement = select_jams()
            .and_where(Expr::col(Jam::Status).eq(JamStatus::Active.to_string()))
            .order_by_expr(Expr::col(Jam::StartTime), sea_query::Order::Asc)
            .order_by_expr(Expr::col(Jam::EventName), sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, JamRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find(&self, id: i64) -> anyhow::Result<Option<JamRow>> {
        let statement = select_jams()
            .and_where(Expr::col(Jam::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, JamRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Submissions waiting for moderation, oldest first.
    pub async fn pending(&self) -> anyhow::Result<Vec<JamRow>> {
        let statement = select_jams()
            .and_where(Expr::col(Jam::Status).eq(JamStatus::Pending.to_string()))
            .order_by_expr(Expr::col(Jam::CreatedAt), sea_query::Order::Asc)
            .order_by_expr(Expr::col(Jam::Id), sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, JamRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}
