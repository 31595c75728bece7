//! Records observed on the document store.
//!
//! All three records are owned by other systems; this service only reads
//! them. Every field is optional and decoded leniently (see
//! [`crate::fields::lenient_string`]).

use serde::{Deserialize, Serialize};

use crate::fields::lenient_string;

/// Booking status set while a service visit is on hold.
pub const STATUS_POSTPONED: &str = "postponed";

/// Booking status set while a technician is working on the request.
pub const STATUS_IN_PROGRESS: &str = "inProgress";

/// A snapshot of a `service_requests/{bookingId}` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    /// Date-like string, usually an ISO-8601 timestamp (`2024-01-02T00:00:00`).
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub requested_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub requested_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ServiceRequestRecord {
    /// The calendar-day part of `requested_date`: everything before the first `T`.
    ///
    /// A value without a `T` is returned whole.
    pub fn requested_day(&self) -> Option<&str> {
        self.requested_date
            .as_deref()
            .and_then(|date| date.split('T').next())
    }

    /// Whether the record currently has the given status.
    pub fn has_status(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }
}

/// A customer document, read to resolve the device push token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    /// Opaque device token. Older clients wrote it as `fcmToken`.
    #[serde(
        default,
        alias = "fcmToken",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub push_token: Option<String>,
}

/// A `customers/{userId}/notifications/{notificationId}` document.
///
/// Written by this service when a booking changes, and by other parts of
/// the platform directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_booking() {
        let record: ServiceRequestRecord = serde_json::from_value(serde_json::json!({
            "customerId": "c1",
            "customerName": "Amina",
            "serviceName": "AC Repair",
            "workerId": "w1",
            "requestedDate": "2024-01-02T00:00:00",
            "requestedTime": "10:00",
            "status": "inProgress",
            "price": 120
        }))
        .unwrap();

        assert_eq!(record.customer_id.as_deref(), Some("c1"));
        assert_eq!(record.service_name.as_deref(), Some("AC Repair"));
        assert!(record.has_status(STATUS_IN_PROGRESS));
        assert_eq!(record.requested_day(), Some("2024-01-02"));
    }

    #[test]
    fn requested_day_without_separator_is_whole_value() {
        let record = ServiceRequestRecord {
            requested_date: Some("next tuesday".into()),
            ..Default::default()
        };
        assert_eq!(record.requested_day(), Some("next tuesday"));
    }

    #[test]
    fn requested_day_absent_when_date_absent() {
        assert_eq!(ServiceRequestRecord::default().requested_day(), None);
    }

    #[test]
    fn user_record_accepts_legacy_token_field() {
        let user: UserRecord =
            serde_json::from_str(r#"{"userId":"u1","fcmToken":"tok-1"}"#).unwrap();
        assert_eq!(user.push_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn notification_record_reads_type_field() {
        let record: NotificationRecord = serde_json::from_str(
            r#"{"title":"X","message":"Y","bookingId":"b1","type":"reassigned","read":false}"#,
        )
        .unwrap();
        assert_eq!(record.notification_type.as_deref(), Some("reassigned"));
        assert_eq!(record.booking_id.as_deref(), Some("b1"));
        assert_eq!(record.body, None);
    }
}
