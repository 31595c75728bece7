//! Integration tests for `POST /api/v1/events`.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, post_json, post_raw};
use notifier_events::{ChangeEvent, EventBus};
use serde_json::json;

const EVENTS: &str = "/api/v1/events";

// ---------------------------------------------------------------------------
// Accepted events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn notification_create_is_published() {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app(Arc::clone(&bus));

    let response = post_json(
        app,
        EVENTS,
        json!({
            "kind": "create",
            "path": "/customers/u1/notifications/n1",
            "data": { "title": "Hi", "message": "Hello", "bookingId": "b1" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "create");
    assert_eq!(json["data"]["path"], "customers/u1/notifications/n1");
    assert_eq!(json["data"]["accepted"], true);

    let event = rx.try_recv().unwrap();
    assert_matches!(event, ChangeEvent::NotificationCreated { user_id, notification_id, record } => {
        assert_eq!(user_id, "u1");
        assert_eq!(notification_id, "n1");
        assert_eq!(record.title.as_deref(), Some("Hi"));
        assert_eq!(record.booking_id.as_deref(), Some("b1"));
    });
}

#[tokio::test]
async fn booking_create_is_published() {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app(Arc::clone(&bus));

    let response = post_json(
        app,
        EVENTS,
        json!({
            "kind": "create",
            "path": "service_requests/b1",
            "data": { "customerName": "Ana", "serviceName": "Cleaning" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_matches!(rx.try_recv().unwrap(), ChangeEvent::BookingCreated { booking_id, record } => {
        assert_eq!(booking_id, "b1");
        assert_eq!(record.customer_name.as_deref(), Some("Ana"));
    });
}

#[tokio::test]
async fn booking_update_is_published() {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app(Arc::clone(&bus));

    let response = post_json(
        app,
        EVENTS,
        json!({
            "kind": "update",
            "path": "service_requests/b1",
            "before": { "customerId": "c1", "workerId": "w1" },
            "after": { "customerId": "c1", "workerId": "w2" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(response).await["data"]["kind"], "update");
    assert_matches!(rx.try_recv().unwrap(), ChangeEvent::BookingUpdated { before, after, .. } => {
        assert_eq!(before.worker_id.as_deref(), Some("w1"));
        assert_eq!(after.worker_id.as_deref(), Some("w2"));
    });
}

#[tokio::test]
async fn event_is_accepted_without_listeners() {
    let app = common::build_test_app(Arc::new(EventBus::default()));

    let response = post_json(
        app,
        EVENTS,
        json!({ "kind": "create", "path": "service_requests/b1", "data": {} }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

// ---------------------------------------------------------------------------
// Rejected events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsupported_path_is_rejected() {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app(Arc::clone(&bus));

    let response = post_json(
        app,
        EVENTS,
        json!({ "kind": "create", "path": "workers/w1", "data": {} }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_PATH");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn update_on_notification_path_is_rejected() {
    let app = common::build_test_app(Arc::new(EventBus::default()));

    let response = post_json(
        app,
        EVENTS,
        json!({
            "kind": "update",
            "path": "customers/u1/notifications/n1",
            "before": {},
            "after": {}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_without_data_is_rejected() {
    let app = common::build_test_app(Arc::new(EventBus::default()));

    let response = post_json(
        app,
        EVENTS,
        json!({ "kind": "create", "path": "service_requests/b1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn update_without_after_is_rejected() {
    let app = common::build_test_app(Arc::new(EventBus::default()));

    let response = post_json(
        app,
        EVENTS,
        json!({ "kind": "update", "path": "service_requests/b1", "before": {} }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_kind_is_rejected() {
    let app = common::build_test_app(Arc::new(EventBus::default()));

    let response = post_json(
        app,
        EVENTS,
        json!({ "kind": "delete", "path": "service_requests/b1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = common::build_test_app(Arc::new(EventBus::default()));

    let response = post_raw(app, EVENTS, "{not json".to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn oversized_envelope_is_rejected() {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app(Arc::clone(&bus));

    // The test config caps bodies at 1 KiB.
    let response = post_json(
        app,
        EVENTS,
        json!({
            "kind": "create",
            "path": "service_requests/b1",
            "data": { "customerName": "x".repeat(4096) }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
    assert!(rx.try_recv().is_err());
}
