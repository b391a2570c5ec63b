use jamguide_jam::{JamStatus, SubmitJamInput, UpdateJamInput};
use jamguide_shared::Error;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
pub async fn test_update_jam_normalises_fields() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;

    let id = state
        .command
        .submit(
            SubmitJamInput {
                venue_name: Some("Starry Plough".to_owned()),
                website_url: Some("https://example.com/jam".to_owned()),
                ..helpers::jam_input("Monday Bluegrass")
            },
            JamStatus::Active,
        )
        .await?;

    state
        .command
        .update_jam(
            id,
            UpdateJamInput {
                event_name: Some("  Thursday Bluegrass ".to_owned()),
                day_of_week: Some("thursday".to_owned()),
                start_time: Some("8 pm".to_owned()),
                venue_name: Some(" ".to_owned()),
                contact_email: Some("host@jamguide.localhost".to_owned()),
                start_date: Some("2025-03-01".to_owned()),
                ..Default::default()
            },
        )
        .await?;

    let jam = state.query.find(id).await?.unwrap();
    assert_eq!(jam.event_name, "Thursday Bluegrass");
    assert_eq!(jam.day_of_week.as_deref(), Some("Thu"));
    assert_eq!(jam.start_time.as_deref(), Some("20:00:00"));
    assert_eq!(jam.venue_name, None);
    assert_eq!(jam.contact_email.as_deref(), Some("host@jamguide.localhost"));
    assert_eq!(jam.start_date.as_deref(), Some("2025-03-01"));
    assert_eq!(jam.city.as_deref(), Some("Berkeley"));
    assert_eq!(jam.website_url.as_deref(), Some("https://example.com/jam"));
    assert!(jam.is_active());

    Ok(())
}

#[tokio::test]
pub async fn test_update_jam_rejects_bad_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;

    let id = state
        .command
        .submit(
            SubmitJamInput {
                start_date: Some("2025-03-01".to_owned()),
                ..helpers::jam_input("Monday Bluegrass")
            },
            JamStatus::Active,
        )
        .await?;

    let cases = [
        (
            UpdateJamInput {
                end_date: Some("2025-02-01".to_owned()),
                ..Default::default()
            },
            "End date must not be before start date",
        ),
        (
            UpdateJamInput {
                city: Some("   ".to_owned()),
                ..Default::default()
            },
            "City is required",
        ),
        (
            UpdateJamInput {
                day_of_week: Some("Someday".to_owned()),
                ..Default::default()
            },
            "Unknown day of week `Someday`",
        ),
        (
            UpdateJamInput {
                website_url: Some("example".to_owned()),
                ..Default::default()
            },
            "Website must be a full URL",
        ),
        (UpdateJamInput::default(), "Nothing to update"),
    ];

    for (input, message) in cases {
        let err = state.command.update_jam(id, input).await.unwrap_err();
        assert_eq!(err.user_message(), message);
    }

    let err = state
        .command
        .update_jam(
            id + 100,
            UpdateJamInput {
                event_name: Some("Ghost Jam".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));

    let jam = state.query.find(id).await?.unwrap();
    assert_eq!(jam.event_name, "Monday Bluegrass");
    assert_eq!(jam.end_date, None);

    Ok(())
}
