//! Poll and choice records.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Poll {
    pub id: i64,
    pub question: String,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub poll_id: i64,
    pub choice_text: String,
    pub votes: i64,
}

/// A poll together with its choices, in creation order.
#[derive(Debug, Clone)]
pub struct PollWithChoices {
    pub poll: Poll,
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct VoteForm {
    // Kept as text so a malformed value is treated like a missing one.
    pub choice: Option<String>,
}

impl VoteForm {
    pub fn choice_id(&self) -> Option<i64> {
        self.choice.as_deref().and_then(|c| c.trim().parse().ok())
    }
}

impl Poll {
    /// A poll is visible once its publish date is not in the future.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    /// True when the poll went out within the last day, and false for polls
    /// dated in the future.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        let age = now - self.pub_date;
        age >= Duration::zero() && age < Duration::days(1)
    }
}

impl fmt::Display for Poll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}
