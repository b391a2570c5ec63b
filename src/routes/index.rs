use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use jamguide_jam::{FilterGroup, JamRow, ListingParams};

use crate::{
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub jams: Vec<JamRow>,
    pub groups: Vec<FilterGroup>,
    pub is_filtered: bool,
    pub calendar_href: String,
}

#[tracing::instrument(skip_all)]
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let params = ListingParams::from_map(&query);
    let jams = crate::try_page_response!(app.query.filter(&params.filter()), template);

    template.render(IndexTemplate {
        groups: jamguide_jam::filter_groups(&params, "/"),
        is_filtered: !params.is_empty(),
        calendar_href: params.href("/calendar"),
        jams,
    })
}
