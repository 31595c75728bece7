//! Route definitions for the `/events` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// POST   /                          -> ingest_event
/// ```
pub fn router(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(events::ingest_event))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
