use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use jamguide_jam::{CalendarMonth, JamRow, ListingParams, MonthGrid, WEEKDAY_HEADERS};

use crate::{
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "calendar.html")]
pub struct CalendarTemplate<'a> {
    pub grid: MonthGrid<'a, JamRow>,
    pub headers: &'static [&'static str],
    pub previous_href: String,
    pub next_href: String,
    pub today_href: String,
    pub listing_href: String,
    pub is_filtered: bool,
}

fn month_href(month: CalendarMonth, params: &ListingParams) -> String {
    let href = format!(
        "/calendar?year={}&month={}",
        month.year(),
        month.month_number()
    );

    match params.is_empty() {
        true => href,
        false => format!("{href}&{}", params.query_string()),
    }
}

#[tracing::instrument(skip_all)]
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let month = CalendarMonth::from_query(
        query.get("year").map(String::as_str),
        query.get("month").map(String::as_str),
        template.today,
    );

    let params = ListingParams::from_map(&query);
    let filter = params.filter();
    let jams = if filter.is_empty() {
        crate::try_page_response!(app.query.active(), template)
    } else {
        crate::try_page_response!(app.query.filter(&filter), template)
    };

    template.render(CalendarTemplate {
        headers: &WEEKDAY_HEADERS,
        previous_href: month_href(month.previous(), &params),
        next_href: month_href(month.next(), &params),
        today_href: month_href(CalendarMonth::containing(template.today), &params),
        listing_href: params.href("/"),
        is_filtered: !params.is_empty(),
        grid: MonthGrid::build(month, &jams, template.today),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::Month;

    use super::*;

    #[test]
    fn test_month_href_keeps_filters() {
        let month = CalendarMonth::new(2025, Month::December).unwrap();
        assert_eq!(
            month_href(month.next(), &ListingParams::default()),
            "/calendar?year=2026&month=1"
        );

        let query = HashMap::from([("dow".to_owned(), "Fri".to_owned())]);
        assert_eq!(
            month_href(month, &ListingParams::from_map(&query)),
            "/calendar?year=2025&month=12&dow=Fri"
        );
    }
}
