//! Error types for the polls app.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::templates::NotFoundTemplate;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Poll not found: {0}")]
    PollNotFound(i64),

    /// Hidden polls surface the same way as missing ones.
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::PollNotFound(_) | Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Template(_) | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, "Server error occurred");
            return (status, "Internal Server Error").into_response();
        }
        tracing::debug!(error = %self, "Client error occurred");

        match NotFoundTemplate.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, "Not Found").into_response(),
        }
    }
}
