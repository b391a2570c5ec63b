use jamguide_jam::{AddReviewInput, Happened, JamStatus, ReviewStats};
use jamguide_shared::Error;
use temp_dir::TempDir;

mod helpers;

fn review(jam_id: i64, overall: i64, happened: Happened) -> AddReviewInput {
    AddReviewInput {
        jam_id,
        display_name: Some("Fiddler".to_owned()),
        comments: None,
        overall_rating: overall,
        networking_rating: 4,
        info_accuracy_rating: 5,
        happened,
    }
}

#[tokio::test]
pub async fn test_reviews_and_stats() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;

    let jam_id = helpers::create_jam(&state, "Monday Bluegrass").await?;
    let other_id = helpers::create_jam(&state, "Tuesday Jazz").await?;

    let first = state.command.add_review(review(jam_id, 5, Happened::Yes)).await?;
    let second = state.command.add_review(review(jam_id, 3, Happened::No)).await?;
    let third = state.command.add_review(review(jam_id, 4, Happened::Unknown)).await?;
    state.command.add_review(review(other_id, 1, Happened::Yes)).await?;

    let reviews = state.query.reviews(jam_id).await?;
    let ids = reviews.iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![third, second, first]);
    assert_eq!(reviews[0].happened, None);
    assert_eq!(reviews[1].happened, Some(false));

    let stats = ReviewStats::from_reviews(reviews.iter().map(|r| r.scores()));
    assert_eq!(stats.count, 3);
    assert_eq!(stats.overall_label(), "4.0");
    assert_eq!(stats.networking_label(), "4.0");
    assert_eq!(stats.info_accuracy_label(), "5.0");
    assert_eq!(stats.checkins, 1);
    assert_eq!(stats.off_nights, 1);

    Ok(())
}

#[tokio::test]
pub async fn test_review_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;

    let jam_id = helpers::create_jam(&state, "Monday Bluegrass").await?;

    let err = state
        .command
        .add_review(review(jam_id, 6, Happened::Yes))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));
    assert_eq!(err.user_message(), "Ratings must be between 1 and 5");

    let err = state
        .command
        .add_review(review(jam_id + 100, 5, Happened::Yes))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));

    let pending = state
        .command
        .submit(helpers::jam_input("Pending"), JamStatus::Pending)
        .await?;
    let err = state
        .command
        .add_review(review(pending, 5, Happened::Yes))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));

    assert!(state.query.reviews(jam_id).await?.is_empty());

    Ok(())
}
