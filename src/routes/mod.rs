use axum::{Router, response::IntoResponse, routing::post};

use crate::template::Template;

mod calendar;
mod health;
mod index;
mod jam;
mod submit;

use axum::routing::get;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub query: jamguide_jam::Query,
    pub command: jamguide_jam::Command,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.not_found()
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.query.0.clone())
        .route("/", get(index::page))
        .route("/calendar", get(calendar::page))
        .route("/jam/{id}", get(jam::page))
        .route("/jam/{id}/reviews", post(jam::review))
        .route("/jam/{id}/claim", post(jam::claim))
        .route("/submit", get(submit::page).post(submit::action))
        .fallback(fallback)
        .nest_service("/static", crate::assets::AssetsService::new())
        .with_state(app_state)
}
