//! Handler for change-event ingestion.
//!
//! The document store (or anything standing in for it) posts every create
//! and update it wants reacted to. Accepted events are published on the
//! event bus; the change event router picks them up asynchronously, so the
//! response only confirms acceptance, never delivery.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use notifier_core::document::{ChangeKind, DocumentPath};
use notifier_events::ChangeEvent;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Inbound change-event envelope.
///
/// `create` events carry the new document in `data`; `update` events carry
/// both snapshots in `before` and `after`.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    pub kind: ChangeKind,
    pub path: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub before: Option<serde_json::Value>,
    #[serde(default)]
    pub after: Option<serde_json::Value>,
}

/// Acknowledgement returned for an accepted event.
#[derive(Debug, Serialize)]
pub struct AcceptedEvent {
    pub kind: ChangeKind,
    pub path: String,
    pub accepted: bool,
}

/// POST /api/v1/events
///
/// Validate the envelope, decode the documents and publish the change.
pub async fn ingest_event(
    State(state): State<AppState>,
    payload: Result<Json<EventEnvelope>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(envelope) = payload.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::BadRequest(e.body_text())
        }
    })?;

    let path = DocumentPath::parse(&envelope.path)?;
    let canonical_path = path.to_string();

    let event = match envelope.kind {
        ChangeKind::Create => {
            let data = envelope
                .data
                .ok_or_else(|| AppError::BadRequest("create events require `data`".into()))?;
            ChangeEvent::created(path, data)?
        }
        ChangeKind::Update => {
            let (Some(before), Some(after)) = (envelope.before, envelope.after) else {
                return Err(AppError::BadRequest(
                    "update events require `before` and `after`".into(),
                ));
            };
            ChangeEvent::updated(path, before, after)?
        }
    };

    let receivers = state.event_bus.publish(event);
    if receivers == 0 {
        tracing::warn!(
            kind = %envelope.kind,
            path = %canonical_path,
            "Change event accepted but no router is listening"
        );
    } else {
        tracing::info!(
            kind = %envelope.kind,
            path = %canonical_path,
            "Change event accepted"
        );
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: AcceptedEvent {
                kind: envelope.kind,
                path: canonical_path,
                accepted: true,
            },
        }),
    ))
}
