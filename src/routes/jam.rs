use std::collections::HashMap;

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use jamguide_jam::{
    AddReviewInput, ClaimJamInput, Happened, JamReviewRow, JamRow, ReviewStats,
};
use jamguide_shared::Error;
use serde::Deserialize;
use strum::VariantArray;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

#[derive(Default)]
pub struct Notice {
    pub message: Option<&'static str>,
    pub review_error: Option<String>,
    pub claim_error: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "jam.html")]
pub struct JamTemplate {
    pub jam: JamRow,
    pub reviews: Vec<JamReviewRow>,
    pub stats: ReviewStats,
    pub notice: Notice,
    pub happened: &'static [Happened],
}

async fn render_page(
    template: &Template,
    app: &AppState,
    id: i64,
    status: StatusCode,
    notice: Notice,
) -> Response {
    let jam = crate::try_page_response!(opt: app.query.find(id), template);
    if !jam.is_active() {
        return template.not_found();
    }

    let reviews = crate::try_page_response!(app.query.reviews(id), template);
    let stats = ReviewStats::from_reviews(reviews.iter().map(JamReviewRow::scores));

    template.render_status(
        status,
        JamTemplate {
            jam,
            reviews,
            stats,
            notice,
            happened: Happened::VARIANTS,
        },
    )
}

fn parse_id(id: &str) -> Option<i64> {
    id.trim().parse().ok().filter(|id| *id > 0)
}

#[tracing::instrument(skip(template, app, query))]
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(id) = parse_id(&id) else {
        return template.not_found();
    };

    let message = if query.contains_key("reviewed") {
        Some("Thanks for the review!")
    } else if query.contains_key("claimed") {
        Some("Claim received. We'll be in touch once it has been checked.")
    } else {
        None
    };

    render_page(
        &template,
        &app,
        id,
        StatusCode::OK,
        Notice {
            message,
            ..Default::default()
        },
    )
    .await
}

/// Maps a command failure to a response, or to the message to show on the form.
fn form_error(template: &Template, err: Error) -> Result<String, Response> {
    match err {
        Error::NotFound => Err(template.not_found()),
        Error::Unknown(err) => {
            tracing::error!("{err}");
            Err(template.server_error())
        }
        err => Ok(err.user_message()),
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn rating(value: &str) -> i64 {
    value.trim().parse().unwrap_or_default()
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ReviewForm {
    pub display_name: String,
    pub comments: String,
    pub overall_rating: String,
    pub networking_rating: String,
    pub info_accuracy_rating: String,
    pub happened: Happened,
}

#[tracing::instrument(skip(template, app, input))]
pub async fn review(
    template: Template,
    State(app): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<ReviewForm>,
) -> impl IntoResponse {
    let Some(id) = parse_id(&id) else {
        return template.not_found();
    };

    let result = app
        .command
        .add_review(AddReviewInput {
            jam_id: id,
            overall_rating: rating(&input.overall_rating),
            networking_rating: rating(&input.networking_rating),
            info_accuracy_rating: rating(&input.info_accuracy_rating),
            display_name: non_empty(input.display_name),
            comments: non_empty(input.comments),
            happened: input.happened,
        })
        .await;

    let review_error = match result {
        Ok(_) => return Redirect::to(&format!("/jam/{id}?reviewed=1")).into_response(),
        Err(err) => match form_error(&template, err) {
            Ok(message) => message,
            Err(response) => return response,
        },
    };

    render_page(
        &template,
        &app,
        id,
        StatusCode::UNPROCESSABLE_ENTITY,
        Notice {
            review_error: Some(review_error),
            ..Default::default()
        },
    )
    .await
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ClaimForm {
    pub claimant_email: String,
    pub phone_number: String,
    pub notes: String,
}

#[tracing::instrument(skip(template, app, input))]
pub async fn claim(
    template: Template,
    State(app): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<ClaimForm>,
) -> impl IntoResponse {
    let Some(id) = parse_id(&id) else {
        return template.not_found();
    };

    let result = app
        .command
        .claim(ClaimJamInput {
            jam_id: id,
            claimant_email: input.claimant_email.trim().to_owned(),
            phone_number: input.phone_number.trim().to_owned(),
            notes: non_empty(input.notes),
        })
        .await;

    let claim_error = match result {
        Ok(_) => return Redirect::to(&format!("/jam/{id}?claimed=1")).into_response(),
        Err(err) => match form_error(&template, err) {
            Ok(message) => message,
            Err(response) => return response,
        },
    };

    render_page(
        &template,
        &app,
        id,
        StatusCode::UNPROCESSABLE_ENTITY,
        Notice {
            claim_error: Some(claim_error),
            ..Default::default()
        },
    )
    .await
}
