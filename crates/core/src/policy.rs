//! Notification policy: which intents a change event produces.
//!
//! Pure functions only. The update rules are independent and not mutually
//! exclusive, so a single booking update may produce up to three intents.

use crate::booking::{
    NotificationRecord, ServiceRequestRecord, STATUS_IN_PROGRESS, STATUS_POSTPONED,
};
use crate::channels::{DEFAULT_TITLE, TYPE_GENERAL};
use crate::intent::{IntentKind, NotificationIntent, Recipient};

pub const TITLE_NEW_BOOKING: &str = "New Booking Received 🆕";
pub const TITLE_REASSIGNED: &str = "Technician Reassigned 👷";
pub const TITLE_RESCHEDULED: &str = "Service Rescheduled 📅";
pub const TITLE_RESUMED: &str = "Service Resumed ▶️";

const DEFAULT_CUSTOMER_NAME: &str = "Customer";
const DEFAULT_SERVICE_NAME: &str = "Service";

/// Decides which notifications a change event should produce.
pub struct NotificationPolicy;

impl NotificationPolicy {
    /// A notification record was created for `push_token`'s owner.
    ///
    /// Title defaults to [`DEFAULT_TITLE`]; the body falls back from
    /// `message` to `body` to the empty string.
    pub fn on_notification_created(
        record: &NotificationRecord,
        push_token: &str,
    ) -> NotificationIntent {
        let kind = IntentKind::Generic(
            record
                .notification_type
                .clone()
                .unwrap_or_else(|| TYPE_GENERAL.to_string()),
        );
        let body = record
            .message
            .as_deref()
            .or(record.body.as_deref())
            .unwrap_or_default();

        NotificationIntent::new(
            kind,
            Recipient::Device(push_token.to_string()),
            record.title.as_deref().unwrap_or(DEFAULT_TITLE),
            body,
            record.booking_id.as_deref().unwrap_or_default(),
        )
    }

    /// A booking was created: always alert the admins.
    pub fn on_booking_created(booking_id: &str, record: &ServiceRequestRecord) -> NotificationIntent {
        let customer = record.customer_name.as_deref().unwrap_or(DEFAULT_CUSTOMER_NAME);
        let service = record.service_name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME);

        NotificationIntent::new(
            IntentKind::NewBooking,
            Recipient::AdminTopic,
            TITLE_NEW_BOOKING,
            format!("New request from {customer}: {service}"),
            booking_id,
        )
    }

    /// A booking was updated: evaluate every customer-facing rule.
    ///
    /// Returns no intents when `after` has no customer to address.
    pub fn on_booking_updated(
        booking_id: &str,
        before: &ServiceRequestRecord,
        after: &ServiceRequestRecord,
    ) -> Vec<NotificationIntent> {
        let Some(customer_id) = after.customer_id.as_deref() else {
            return Vec::new();
        };

        let mut intents = Vec::new();

        if is_reassigned(before, after) {
            let service = after.service_name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME);
            intents.push(NotificationIntent::new(
                IntentKind::Reassigned,
                Recipient::Customer(customer_id.to_string()),
                TITLE_REASSIGNED,
                format!("A new technician has been assigned to your service: {service}"),
                booking_id,
            ));
        }

        if is_rescheduled(before, after) {
            let day = after.requested_day().unwrap_or_default();
            let time = after.requested_time.as_deref().unwrap_or_default();
            intents.push(NotificationIntent::new(
                IntentKind::Rescheduled,
                Recipient::Customer(customer_id.to_string()),
                TITLE_RESCHEDULED,
                format!("Your service has been rescheduled to {day} at {time}"),
                booking_id,
            ));
        }

        if is_resumed(before, after) {
            let service = after.service_name.as_deref().unwrap_or_default();
            intents.push(NotificationIntent::new(
                IntentKind::Resumed,
                Recipient::Customer(customer_id.to_string()),
                TITLE_RESUMED,
                format!("Your service {service} has been resumed."),
                booking_id,
            ));
        }

        intents
    }
}

/// A worker is assigned and it is not the one assigned before.
fn is_reassigned(before: &ServiceRequestRecord, after: &ServiceRequestRecord) -> bool {
    after.worker_id.is_some() && after.worker_id != before.worker_id
}

/// Date or time changed, counting only values present on both sides.
fn is_rescheduled(before: &ServiceRequestRecord, after: &ServiceRequestRecord) -> bool {
    changed(&before.requested_date, &after.requested_date)
        || changed(&before.requested_time, &after.requested_time)
}

fn is_resumed(before: &ServiceRequestRecord, after: &ServiceRequestRecord) -> bool {
    before.has_status(STATUS_POSTPONED) && after.has_status(STATUS_IN_PROGRESS)
}

fn changed(before: &Option<String>, after: &Option<String>) -> bool {
    matches!((before, after), (Some(b), Some(a)) if a != b)
}
