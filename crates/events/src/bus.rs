//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`ChangeEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use notifier_core::booking::{NotificationRecord, ServiceRequestRecord};
use notifier_core::document::{ChangeKind, DocumentPath};
use notifier_core::error::CoreError;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// A document write observed on the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A notification document was created under a customer.
    NotificationCreated {
        user_id: String,
        notification_id: String,
        record: NotificationRecord,
    },
    /// A service request was created.
    BookingCreated {
        booking_id: String,
        record: ServiceRequestRecord,
    },
    /// A service request was updated.
    BookingUpdated {
        booking_id: String,
        before: ServiceRequestRecord,
        after: ServiceRequestRecord,
    },
}

impl ChangeEvent {
    /// Build the event for a document created at `path` with contents `data`.
    pub fn created(path: DocumentPath, data: serde_json::Value) -> Result<Self, CoreError> {
        match path {
            DocumentPath::CustomerNotification {
                user_id,
                notification_id,
            } => Ok(Self::NotificationCreated {
                user_id,
                notification_id,
                record: decode(data)?,
            }),
            DocumentPath::ServiceRequest { booking_id } => Ok(Self::BookingCreated {
                booking_id,
                record: decode(data)?,
            }),
        }
    }

    /// Build the event for a document at `path` changing from `before` to `after`.
    ///
    /// Only service requests have an update handler.
    pub fn updated(
        path: DocumentPath,
        before: serde_json::Value,
        after: serde_json::Value,
    ) -> Result<Self, CoreError> {
        match path {
            DocumentPath::ServiceRequest { booking_id } => Ok(Self::BookingUpdated {
                booking_id,
                before: decode(before)?,
                after: decode(after)?,
            }),
            other => Err(CoreError::Validation(format!(
                "no handler for update at {other}"
            ))),
        }
    }

    /// The kind of write this event reports.
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::NotificationCreated { .. } | Self::BookingCreated { .. } => ChangeKind::Create,
            Self::BookingUpdated { .. } => ChangeKind::Update,
        }
    }

    /// The document the event is about.
    pub fn path(&self) -> DocumentPath {
        match self {
            Self::NotificationCreated {
                user_id,
                notification_id,
                ..
            } => DocumentPath::CustomerNotification {
                user_id: user_id.clone(),
                notification_id: notification_id.clone(),
            },
            Self::BookingCreated { booking_id, .. } | Self::BookingUpdated { booking_id, .. } => {
                DocumentPath::ServiceRequest {
                    booking_id: booking_id.clone(),
                }
            }
        }
    }
}

fn decode<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, CoreError> {
    serde_json::from_value(data)
        .map_err(|e| CoreError::Validation(format!("invalid document: {e}")))
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ChangeEvent`].
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see the event. If there
    /// are none, the event is dropped.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
