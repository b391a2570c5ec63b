use axum::http::{StatusCode, header};
use jamguide_jam::{JamStatus, SubmitJamInput};
use temp_dir::TempDir;

mod helpers;

use helpers::{body_text, create_jam, get, jam_input, post_form, setup_test_app};

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_health_and_ready() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;

    assert_eq!(get(&app, "/health").await?.status(), StatusCode::OK);

    let ready = get(&app, "/ready").await?;
    assert_eq!(ready.status(), StatusCode::OK);
    assert!(body_text(ready).await?.contains("ready"));

    Ok(())
}

#[tokio::test]
async fn test_listing_filters_active_jams() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;

    create_jam(&app, jam_input("Friday Grass")).await?;
    create_jam(
        &app,
        SubmitJamInput {
            day_of_week: Some("Mon".to_owned()),
            ..jam_input("Monday Swing")
        },
    )
    .await?;
    app.command
        .submit(jam_input("Hidden Pending"), JamStatus::Pending)
        .await?;

    let response = get(&app, "/").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await?;
    assert!(body.contains("2 jams"));
    assert!(body.contains("Friday Grass"));
    assert!(body.contains("Monday Swing"));
    assert!(!body.contains("Hidden Pending"));

    let body = body_text(get(&app, "/?dow=Mon").await?).await?;
    assert!(body.contains("1 jam<"));
    assert!(body.contains("Monday Swing"));
    assert!(!body.contains("Friday Grass"));
    assert!(body.contains("Clear filters"));

    Ok(())
}

#[tokio::test]
async fn test_calendar_places_jams_on_their_days() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;

    create_jam(&app, jam_input("Friday Grass")).await?;

    let response = get(&app, "/calendar?year=2025&month=11").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains("November 2025"));
    assert_eq!(body.matches("Friday Grass").count(), 4);
    assert!(body.contains("/calendar?year=2025&amp;month=10"));
    assert!(body.contains("/calendar?year=2025&amp;month=12"));

    let response = get(&app, "/calendar?year=abc&month=13").await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_jam_detail_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;

    let pending = app
        .command
        .submit(jam_input("Hidden Pending"), JamStatus::Pending)
        .await?;

    assert_eq!(get(&app, "/jam/999").await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/jam/abc").await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        get(&app, &format!("/jam/{pending}")).await?.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(get(&app, "/nowhere").await?.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_review_flow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;
    let id = create_jam(&app, jam_input("Friday Grass")).await?;

    let body = body_text(get(&app, &format!("/jam/{id}")).await?).await?;
    assert!(body.contains("0 reviews"));

    let response = post_form(
        &app,
        &format!("/jam/{id}/reviews"),
        &[
            ("display_name", "Banjo Pat"),
            ("overall_rating", "5"),
            ("networking_rating", "4"),
            ("info_accuracy_rating", "3"),
            ("happened", "yes"),
            ("comments", "Great pickers"),
        ],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/jam/{id}?reviewed=1"));

    let body = body_text(get(&app, &format!("/jam/{id}?reviewed=1")).await?).await?;
    assert!(body.contains("Thanks for the review!"));
    assert!(body.contains("1 review<"));
    assert!(body.contains("Banjo Pat"));
    assert!(body.contains("5.0"));
    assert!(body.contains("1 check-in<"));

    let response = post_form(
        &app,
        &format!("/jam/{id}/reviews"),
        &[
            ("overall_rating", "9"),
            ("networking_rating", "4"),
            ("info_accuracy_rating", "3"),
        ],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await?.contains("Ratings must be between 1 and 5"));

    let response = post_form(
        &app,
        "/jam/999/reviews",
        &[
            ("overall_rating", "5"),
            ("networking_rating", "5"),
            ("info_accuracy_rating", "5"),
        ],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_claim_flow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;
    let id = create_jam(&app, jam_input("Friday Grass")).await?;

    let form = [
        ("claimant_email", "host@example.com"),
        ("phone_number", "415 555 0100"),
        ("notes", "I run this one"),
    ];

    let response = post_form(&app, &format!("/jam/{id}/claim"), &form).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/jam/{id}?claimed=1"));

    let response = post_form(&app, &format!("/jam/{id}/claim"), &form).await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_text(response)
            .await?
            .contains("You already have a pending claim for this jam")
    );

    let response = post_form(
        &app,
        &format!("/jam/{id}/claim"),
        &[("claimant_email", "not-an-email"), ("phone_number", "415 555 0100")],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await?.contains("Email is not valid"));

    Ok(())
}

#[tokio::test]
async fn test_submit_publishes_jam() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;

    let response = get(&app, "/submit").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await?.contains("Marin County"));

    let response = post_form(
        &app,
        "/submit",
        &[
            ("event_name", "Tuesday Swing"),
            ("city", "Oakland"),
            ("region", "East Bay"),
            ("day_of_week", "Tue"),
            ("start_time", "7:30 pm"),
            ("frequency", "weekly"),
            ("includes_dancing", "on"),
        ],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let href = location(&response).to_owned();
    assert!(href.starts_with("/jam/"));

    let body = body_text(get(&app, &href).await?).await?;
    assert!(body.contains("Tuesday Swing"));
    assert!(body.contains("19:30"));

    let body = body_text(get(&app, "/?dancing=1").await?).await?;
    assert!(body.contains("Tuesday Swing"));

    Ok(())
}

#[tokio::test]
async fn test_submit_shows_validation_errors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;

    let response = post_form(
        &app,
        "/submit",
        &[("event_name", " "), ("city", "Oakland"), ("region", "East Bay")],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(response).await?;
    assert!(body.contains("Event name is required"));
    assert!(body.contains("Oakland"));

    let response = post_form(
        &app,
        "/submit",
        &[
            ("event_name", "Late Jam"),
            ("city", "Oakland"),
            ("region", "East Bay"),
            ("start_time", "25:00"),
        ],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await?.contains("invalid time"));

    Ok(())
}

#[tokio::test]
async fn test_moderated_submission_is_held() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), true).await?;

    let response = post_form(
        &app,
        "/submit",
        &[
            ("event_name", "Held Back Jam"),
            ("city", "Oakland"),
            ("region", "East Bay"),
        ],
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await?.contains("once it has been approved"));

    let body = body_text(get(&app, "/").await?).await?;
    assert!(!body.contains("Held Back Jam"));

    Ok(())
}

#[tokio::test]
async fn test_static_assets() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = setup_test_app(dir.child("db.sqlite3"), false).await?;

    let response = get(&app, "/static/app.css").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    assert_eq!(
        get(&app, "/static/missing.js").await?.status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}
