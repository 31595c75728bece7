use std::sync::Arc;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, probed by the health check.
    pub pool: notifier_db::DbPool,
    /// Bus that ingested change events are published on.
    pub event_bus: Arc<notifier_events::EventBus>,
}
