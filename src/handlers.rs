//! Page handlers for the polls routes.

use askama::Template;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use http::{header, StatusCode};

use crate::error::{AppError, AppResult};
use crate::models::VoteForm;
use crate::poll::VoteOutcome;
use crate::routes::AppState;
use crate::templates::{DetailTemplate, IndexTemplate, ResultsTemplate, NO_CHOICE_MESSAGE};

/// Path of a poll's results page.
pub fn results_path(poll_id: i64) -> String {
    format!("/polls/{poll_id}/results/")
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Ids that are not a number (or do not fit an i64) name no poll.
fn parse_poll_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id).map_err(|_| AppError::NotFound)
}

pub async fn root() -> Response {
    found("/polls/")
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// List published polls, newest first
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let latest_poll_list = state.store.latest_polls(Utc::now()).await?;
    let page = IndexTemplate { latest_poll_list }.render()?;
    Ok(Html(page))
}

/// Show a published poll with its voting form
pub async fn detail(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Html<String>> {
    let poll_id = parse_poll_id(path)?;
    let current = state.store.visible_poll(poll_id, Utc::now()).await?;
    let page = DetailTemplate {
        poll: &current.poll,
        choices: &current.choices,
        error_message: None,
    }
    .render()?;
    Ok(Html(page))
}

/// Show vote counts for a published poll
pub async fn results(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Html<String>> {
    let poll_id = parse_poll_id(path)?;
    let current = state.store.visible_poll(poll_id, Utc::now()).await?;
    let page = ResultsTemplate {
        poll: &current.poll,
        choices: &current.choices,
    }
    .render()?;
    Ok(Html(page))
}

/// Vote for a choice
///
/// A body that is missing or not form-encoded counts as no selection.
pub async fn vote(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> AppResult<Response> {
    let poll_id = parse_poll_id(path)?;
    let choice_id = form.ok().and_then(|Form(form)| form.choice_id());

    match state.store.vote(poll_id, choice_id).await? {
        VoteOutcome::Voted => {
            tracing::info!(poll_id, ?choice_id, "Vote recorded");
            Ok(found(&results_path(poll_id)))
        }
        VoteOutcome::InvalidSelection => {
            tracing::debug!(poll_id, ?choice_id, "Vote without a valid choice");
            let current = state.store.poll_with_choices(poll_id).await?;
            let page = DetailTemplate {
                poll: &current.poll,
                choices: &current.choices,
                error_message: Some(NO_CHOICE_MESSAGE),
            }
            .render()?;
            Ok(Html(page).into_response())
        }
    }
}
