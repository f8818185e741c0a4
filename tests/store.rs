//! `PollStore` queries against an in-memory database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, Utc};
use polls::config::DatabaseConfig;
use polls::{db, AppError, PollStore, VoteOutcome};

async fn store() -> PollStore {
    let pool = db::create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .unwrap();
    PollStore::new(pool)
}

#[tokio::test]
async fn latest_polls_only_lists_published_newest_first() {
    let store = store().await;
    let now = Utc::now();
    let old = store.create_poll("Old", now - Duration::days(30)).await.unwrap();
    store.create_poll("Upcoming", now + Duration::hours(1)).await.unwrap();
    let fresh = store.create_poll("Fresh", now - Duration::minutes(5)).await.unwrap();
    let edge = store.create_poll("Edge", now).await.unwrap();

    let ids: Vec<i64> = store
        .latest_polls(now)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![edge.id, fresh.id, old.id]);
}

#[tokio::test]
async fn pub_date_round_trips() {
    let store = store().await;
    let pub_date = Utc::now() - Duration::days(2);
    let poll = store.create_poll("When?", pub_date).await.unwrap();

    let loaded = store.get_poll(poll.id).await.unwrap().unwrap();
    assert_eq!(loaded.pub_date, pub_date);
    assert_eq!(loaded.question, "When?");
}

#[tokio::test]
async fn visible_poll_hides_future_and_missing_polls() {
    let store = store().await;
    let now = Utc::now();
    let future = store.create_poll("Later", now + Duration::days(5)).await.unwrap();
    let past = store.create_poll("Before", now - Duration::days(5)).await.unwrap();

    assert!(matches!(
        store.visible_poll(future.id, now).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        store.visible_poll(past.id + 100, now).await,
        Err(AppError::NotFound)
    ));
    assert_eq!(store.visible_poll(past.id, now).await.unwrap().poll, past);
}

#[tokio::test]
async fn choices_keep_creation_order() {
    let store = store().await;
    let poll = store.create_poll("Pick", Utc::now()).await.unwrap();
    for text in ["Awesome!", "Good", "Bad"] {
        store.create_choice(poll.id, text).await.unwrap();
    }

    let texts: Vec<String> = store
        .choices_for(poll.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.choice_text)
        .collect();
    assert_eq!(texts, ["Awesome!", "Good", "Bad"]);
}

#[tokio::test]
async fn choice_for_missing_poll_is_rejected() {
    let store = store().await;

    assert!(matches!(
        store.create_choice(42, "Orphan").await,
        Err(AppError::PollNotFound(42))
    ));
}

#[tokio::test]
async fn vote_increments_only_the_selected_choice() {
    let store = store().await;
    let poll = store.create_poll("Pick", Utc::now()).await.unwrap();
    let a = store.create_choice(poll.id, "A").await.unwrap();
    let b = store.create_choice(poll.id, "B").await.unwrap();
    assert_eq!(a.votes, 0);

    assert_eq!(store.vote(poll.id, Some(a.id)).await.unwrap(), VoteOutcome::Voted);
    assert_eq!(store.vote(poll.id, Some(a.id)).await.unwrap(), VoteOutcome::Voted);

    assert_eq!(store.get_choice(a.id).await.unwrap().unwrap().votes, 2);
    assert_eq!(store.get_choice(b.id).await.unwrap().unwrap().votes, 0);
}

#[tokio::test]
async fn vote_without_valid_choice_changes_nothing() {
    let store = store().await;
    let poll = store.create_poll("Pick", Utc::now()).await.unwrap();
    let other = store.create_poll("Other", Utc::now()).await.unwrap();
    let a = store.create_choice(poll.id, "A").await.unwrap();
    let foreign = store.create_choice(other.id, "X").await.unwrap();

    assert_eq!(
        store.vote(poll.id, None).await.unwrap(),
        VoteOutcome::InvalidSelection
    );
    assert_eq!(
        store.vote(poll.id, Some(foreign.id)).await.unwrap(),
        VoteOutcome::InvalidSelection
    );
    assert_eq!(
        store.vote(poll.id, Some(foreign.id + 100)).await.unwrap(),
        VoteOutcome::InvalidSelection
    );

    assert_eq!(store.get_choice(a.id).await.unwrap().unwrap().votes, 0);
    assert_eq!(store.get_choice(foreign.id).await.unwrap().unwrap().votes, 0);
}

#[tokio::test]
async fn vote_on_missing_poll_is_not_found() {
    let store = store().await;
    let poll = store.create_poll("Pick", Utc::now()).await.unwrap();
    let a = store.create_choice(poll.id, "A").await.unwrap();

    assert!(matches!(
        store.vote(poll.id + 1, Some(a.id)).await,
        Err(AppError::PollNotFound(_))
    ));
    assert_eq!(store.get_choice(a.id).await.unwrap().unwrap().votes, 0);
}

#[tokio::test]
async fn vote_is_accepted_for_unpublished_poll() {
    let store = store().await;
    let poll = store
        .create_poll("Soon", Utc::now() + Duration::days(5))
        .await
        .unwrap();
    let a = store.create_choice(poll.id, "A").await.unwrap();

    assert_eq!(store.vote(poll.id, Some(a.id)).await.unwrap(), VoteOutcome::Voted);
}
