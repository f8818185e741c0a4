//! A small polling site: published polls, their choices, and a vote form.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod poll;
pub mod routes;
pub mod templates;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use poll::{PollStore, VoteOutcome};
pub use routes::{create_routes, AppState};
