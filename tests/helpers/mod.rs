use std::path::PathBuf;

use axum::{Router, body::Body, http::Request, response::Response};
use http_body_util::BodyExt;
use jamguide::{
    AppState,
    config::{
        CalendarConfig, Config, DatabaseConfig, FeatureConfig, ObservabilityConfig, ServerConfig,
    },
};
use jamguide_jam::{Command, JamStatus, Query, SubmitJamInput};
use sqlx_migrator::{Migrate, Plan};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub command: Command,
}

pub fn config(path: &PathBuf, moderate_submissions: bool) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", path.to_str().unwrap()),
            max_connections: 1,
        },
        calendar: CalendarConfig {
            timezone: "UTC".to_owned(),
        },
        observability: ObservabilityConfig::default(),
        features: FeatureConfig {
            moderate_submissions,
        },
    }
}

pub async fn setup_test_app(path: PathBuf, moderate_submissions: bool) -> anyhow::Result<TestApp> {
    let config = config(&path, moderate_submissions);
    let pool = jamguide::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    jamguide_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let command = Command(pool.clone());
    let router = jamguide::routes::router(AppState {
        config,
        query: Query(pool.clone()),
        command: command.clone(),
    });

    Ok(TestApp { router, command })
}

#[allow(dead_code)]
pub async fn create_jam(app: &TestApp, input: SubmitJamInput) -> anyhow::Result<i64> {
    Ok(app.command.submit(input, JamStatus::Active).await?)
}

#[allow(dead_code)]
pub fn jam_input(name: &str) -> SubmitJamInput {
    SubmitJamInput {
        event_name: name.to_owned(),
        city: "Berkeley".to_owned(),
        region: "East Bay".to_owned(),
        day_of_week: Some("Fri".to_owned()),
        frequency: Some("weekly".to_owned()),
        start_time: Some("19:30".to_owned()),
        ..Default::default()
    }
}

pub async fn get(app: &TestApp, uri: &str) -> anyhow::Result<Response> {
    let request = Request::builder().uri(uri).body(Body::empty())?;

    Ok(app.router.clone().oneshot(request).await?)
}

#[allow(dead_code)]
pub async fn post_form(app: &TestApp, uri: &str, form: &[(&str, &str)]) -> anyhow::Result<Response> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(form)?))?;

    Ok(app.router.clone().oneshot(request).await?)
}

pub async fn body_text(response: Response) -> anyhow::Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(String::from_utf8(bytes.to_vec())?)
}
