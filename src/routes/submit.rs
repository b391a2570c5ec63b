use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use jamguide_jam::{
    COVER_TYPE_OPTIONS, CROWD_OPTIONS, EVENT_KIND_OPTIONS, FilterOption, Frequency,
    GENRE_OPTIONS, INVITE_OPTIONS, JamStatus, REGION_OPTIONS, SKILL_LEVEL_OPTIONS,
    SubmitJamInput, TIME_OF_DAY_OPTIONS,
};
use jamguide_shared::Error;
use serde::Deserialize;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

const DAYS: &[&str] = &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const FREQUENCIES: &[&str] = &[
    "weekly",
    "biweekly",
    "monthly",
    "1st_monthly",
    "2nd_monthly",
    "3rd_monthly",
    "4th_monthly",
    "2nd_4th_monthly",
    "1st_3rd_monthly",
    "yearly",
    "one_off",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// One choice per stored value. Options covering several values are listed
/// by value.
fn choices(options: &[FilterOption]) -> Vec<Choice> {
    let mut choices: Vec<Choice> = vec![];

    for option in options {
        for &value in option.db_values {
            if choices.iter().any(|c| c.value == value) {
                continue;
            }

            let label = match option.db_values.len() {
                1 => option.label,
                _ => value,
            };

            choices.push(Choice { value, label });
        }
    }

    choices
}

fn frequency_choices() -> Vec<Choice> {
    FREQUENCIES
        .iter()
        .map(|&value| Choice {
            value,
            label: Frequency::parse(value).label(),
        })
        .collect()
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SubmitForm {
    pub event_name: String,
    pub event_kind: String,
    pub primary_genre: String,
    pub skill_level: String,
    pub venue_name: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub greater_region: String,
    pub state: String,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub recurrence_description: String,
    pub frequency: String,
    pub weeks_of_month: String,
    pub start_date: String,
    pub end_date: String,
    pub time_of_day: String,
    pub avg_crowd_size: String,
    pub invite_status: String,
    pub cover_charge_type: String,
    pub includes_dancing: Option<String>,
    pub is_house_jam: Option<String>,
    pub is_festival: Option<String>,
    pub website_url: String,
    pub contact_email: String,
    pub event_description: String,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

impl From<&SubmitForm> for SubmitJamInput {
    fn from(form: &SubmitForm) -> Self {
        Self {
            event_name: form.event_name.trim().to_owned(),
            event_kind: non_empty(&form.event_kind),
            primary_genre: non_empty(&form.primary_genre),
            skill_level: non_empty(&form.skill_level),
            venue_name: non_empty(&form.venue_name),
            address: non_empty(&form.address),
            city: form.city.trim().to_owned(),
            region: form.region.trim().to_owned(),
            greater_region: non_empty(&form.greater_region),
            state: non_empty(&form.state),
            day_of_week: non_empty(&form.day_of_week),
            start_time: non_empty(&form.start_time),
            end_time: non_empty(&form.end_time),
            recurrence_description: non_empty(&form.recurrence_description),
            frequency: non_empty(&form.frequency),
            weeks_of_month: non_empty(&form.weeks_of_month),
            start_date: non_empty(&form.start_date),
            end_date: non_empty(&form.end_date),
            time_of_day: non_empty(&form.time_of_day),
            avg_crowd_size: non_empty(&form.avg_crowd_size),
            invite_status: non_empty(&form.invite_status),
            cover_charge_type: non_empty(&form.cover_charge_type),
            includes_dancing: form.includes_dancing.is_some(),
            is_house_jam: form.is_house_jam.is_some(),
            is_festival: form.is_festival.is_some(),
            website_url: non_empty(&form.website_url),
            contact_email: non_empty(&form.contact_email),
            event_description: non_empty(&form.event_description),
        }
    }
}

#[derive(askama::Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub form: SubmitForm,
    pub error: Option<String>,
    pub submitted: bool,
    pub moderated: bool,
    pub regions: Vec<Choice>,
    pub days: Vec<Choice>,
    pub frequencies: Vec<Choice>,
    pub times_of_day: Vec<Choice>,
    pub genres: Vec<Choice>,
    pub skills: Vec<Choice>,
    pub invites: Vec<Choice>,
    pub crowds: Vec<Choice>,
    pub cover_types: Vec<Choice>,
    pub kinds: Vec<Choice>,
}

impl SubmitTemplate {
    fn new(form: SubmitForm, moderated: bool) -> Self {
        Self {
            form,
            error: None,
            submitted: false,
            moderated,
            regions: choices(REGION_OPTIONS),
            days: DAYS.iter().map(|&day| Choice { value: day, label: day }).collect(),
            frequencies: frequency_choices(),
            times_of_day: choices(TIME_OF_DAY_OPTIONS),
            genres: choices(GENRE_OPTIONS),
            skills: choices(SKILL_LEVEL_OPTIONS),
            invites: choices(INVITE_OPTIONS),
            crowds: choices(CROWD_OPTIONS),
            cover_types: choices(COVER_TYPE_OPTIONS),
            kinds: choices(EVENT_KIND_OPTIONS),
        }
    }
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    template.render(SubmitTemplate::new(
        SubmitForm::default(),
        app.config.features.moderate_submissions,
    ))
}

#[tracing::instrument(skip_all)]
pub async fn action(
    template: Template,
    State(app): State<AppState>,
    Form(input): Form<SubmitForm>,
) -> impl IntoResponse {
    let moderated = app.config.features.moderate_submissions;
    let status = match moderated {
        true => JamStatus::Pending,
        false => JamStatus::Active,
    };

    let err = match app.command.submit(SubmitJamInput::from(&input), status).await {
        Ok(id) if moderated => {
            tracing::info!(id, "submission waiting for approval");

            return template.render(SubmitTemplate {
                submitted: true,
                ..SubmitTemplate::new(SubmitForm::default(), moderated)
            });
        }
        Ok(id) => return Redirect::to(&format!("/jam/{id}")).into_response(),
        Err(Error::Unknown(err)) => {
            tracing::error!("{err}");
            return template.server_error();
        }
        Err(err) => err,
    };

    template.render_status(
        StatusCode::UNPROCESSABLE_ENTITY,
        SubmitTemplate {
            error: Some(err.user_message()),
            ..SubmitTemplate::new(input, moderated)
        },
    )
}
