//! Router construction.

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::poll::PollStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: PollStore,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: PollStore::new(pool),
        }
    }
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/polls/", get(handlers::index))
        .route("/polls/{poll_id}/", get(handlers::detail))
        .route("/polls/{poll_id}/results/", get(handlers::results))
        .route("/polls/{poll_id}/vote/", post(handlers::vote))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
