pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /events                                          change-event ingestion (POST)
/// ```
///
/// `max_event_body_bytes` caps the envelope size; larger bodies get 413.
pub fn api_routes(max_event_body_bytes: usize) -> Router<AppState> {
    Router::new().nest("/events", events::router(max_event_body_bytes))
}
