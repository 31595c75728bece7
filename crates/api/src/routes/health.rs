use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check payload.
///
/// `degraded` means events would be accepted but not delivered: either the
/// database is unreachable or no change event router is subscribed.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub router_listening: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match notifier_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let router_listening = state.event_bus.receiver_count() > 0;

    Json(HealthResponse {
        status: if db_healthy && router_listening {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        router_listening,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
