//! Document paths and change kinds understood by the event router.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Top-level collection holding customer documents.
pub const CUSTOMERS_COLLECTION: &str = "customers";

/// Sub-collection holding a customer's notification log.
pub const NOTIFICATIONS_COLLECTION: &str = "notifications";

/// Top-level collection holding service requests (bookings).
pub const SERVICE_REQUESTS_COLLECTION: &str = "service_requests";

/// The kind of write that produced a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// A document location this service reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPath {
    /// `customers/{userId}/notifications/{notificationId}`
    CustomerNotification {
        user_id: String,
        notification_id: String,
    },
    /// `service_requests/{bookingId}`
    ServiceRequest { booking_id: String },
}

impl DocumentPath {
    /// Parse a slash-separated document path.
    ///
    /// Leading and trailing slashes are ignored. Every id segment must be
    /// non-empty and no extra segments are allowed.
    pub fn parse(path: &str) -> Result<Self, CoreError> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match segments.as_slice() {
            [CUSTOMERS_COLLECTION, user_id, NOTIFICATIONS_COLLECTION, notification_id]
                if !user_id.is_empty() && !notification_id.is_empty() =>
            {
                Ok(Self::CustomerNotification {
                    user_id: (*user_id).to_string(),
                    notification_id: (*notification_id).to_string(),
                })
            }
            [SERVICE_REQUESTS_COLLECTION, booking_id] if !booking_id.is_empty() => {
                Ok(Self::ServiceRequest {
                    booking_id: (*booking_id).to_string(),
                })
            }
            _ => Err(CoreError::UnsupportedPath(path.to_string())),
        }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomerNotification {
                user_id,
                notification_id,
            } => write!(
                f,
                "{CUSTOMERS_COLLECTION}/{user_id}/{NOTIFICATIONS_COLLECTION}/{notification_id}"
            ),
            Self::ServiceRequest { booking_id } => {
                write!(f, "{SERVICE_REQUESTS_COLLECTION}/{booking_id}")
            }
        }
    }
}
