//! Poll queries and vote recording.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::{Choice, Poll, PollWithChoices};

/// Result of a vote attempt on an existing poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Voted,
    /// No choice was submitted, or it does not belong to the poll.
    InvalidSelection,
}

/// Queries over the `polls` and `choices` tables.
#[derive(Debug, Clone)]
pub struct PollStore {
    pool: SqlitePool,
}

impl PollStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_poll(&self, question: &str, pub_date: DateTime<Utc>) -> AppResult<Poll> {
        let poll = sqlx::query_as::<_, Poll>(
            r#"
            INSERT INTO polls (question, pub_date)
            VALUES (?, ?)
            RETURNING id, question, pub_date
            "#,
        )
        .bind(question)
        .bind(pub_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(poll_id = poll.id, "Created poll");
        Ok(poll)
    }

    pub async fn create_choice(&self, poll_id: i64, choice_text: &str) -> AppResult<Choice> {
        if self.get_poll(poll_id).await?.is_none() {
            return Err(AppError::PollNotFound(poll_id));
        }

        let choice = sqlx::query_as::<_, Choice>(
            r#"
            INSERT INTO choices (poll_id, choice_text, votes)
            VALUES (?, ?, 0)
            RETURNING id, poll_id, choice_text, votes
            "#,
        )
        .bind(poll_id)
        .bind(choice_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(choice)
    }

    pub async fn get_poll(&self, poll_id: i64) -> AppResult<Option<Poll>> {
        let poll = sqlx::query_as::<_, Poll>("SELECT id, question, pub_date FROM polls WHERE id = ?")
            .bind(poll_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(poll)
    }

    pub async fn get_choice(&self, choice_id: i64) -> AppResult<Option<Choice>> {
        let choice = sqlx::query_as::<_, Choice>(
            "SELECT id, poll_id, choice_text, votes FROM choices WHERE id = ?",
        )
        .bind(choice_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(choice)
    }

    /// Choices of a poll in creation order.
    pub async fn choices_for(&self, poll_id: i64) -> AppResult<Vec<Choice>> {
        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, poll_id, choice_text, votes
            FROM choices
            WHERE poll_id = ?
            ORDER BY id
            "#,
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(choices)
    }

    /// Polls published at or before `now`, newest first.
    pub async fn latest_polls(&self, now: DateTime<Utc>) -> AppResult<Vec<Poll>> {
        let polls = sqlx::query_as::<_, Poll>(
            r#"
            SELECT id, question, pub_date
            FROM polls
            WHERE pub_date <= ?
            ORDER BY pub_date DESC, id DESC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(polls)
    }

    /// Loads a poll for display. Missing and not-yet-published polls are
    /// both reported as `NotFound`.
    pub async fn visible_poll(&self, poll_id: i64, now: DateTime<Utc>) -> AppResult<PollWithChoices> {
        let poll = self
            .get_poll(poll_id)
            .await?
            .filter(|poll| poll.is_visible(now))
            .ok_or(AppError::NotFound)?;
        let choices = self.choices_for(poll.id).await?;
        Ok(PollWithChoices { poll, choices })
    }

    /// Loads a poll regardless of its publish date.
    pub async fn poll_with_choices(&self, poll_id: i64) -> AppResult<PollWithChoices> {
        let poll = self
            .get_poll(poll_id)
            .await?
            .ok_or(AppError::PollNotFound(poll_id))?;
        let choices = self.choices_for(poll.id).await?;
        Ok(PollWithChoices { poll, choices })
    }

    /// Records one vote for `choice_id` on `poll_id`.
    ///
    /// The increment and the ownership check are one statement, so a choice
    /// of another poll is never touched.
    pub async fn vote(&self, poll_id: i64, choice_id: Option<i64>) -> AppResult<VoteOutcome> {
        if self.get_poll(poll_id).await?.is_none() {
            return Err(AppError::PollNotFound(poll_id));
        }

        let Some(choice_id) = choice_id else {
            return Ok(VoteOutcome::InvalidSelection);
        };

        let result = sqlx::query(
            r#"
            UPDATE choices
            SET votes = votes + 1
            WHERE id = ? AND poll_id = ?
            "#,
        )
        .bind(choice_id)
        .bind(poll_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(VoteOutcome::InvalidSelection);
        }
        Ok(VoteOutcome::Voted)
    }
}
