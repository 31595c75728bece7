//! Customer notification log models.

use notifier_core::booking::NotificationRecord;
use notifier_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `customer_notifications` table.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerNotification {
    pub id: DbId,
    pub customer_id: String,
    pub title: String,
    pub message: String,
    pub body: String,
    #[sqlx(rename = "type")]
    pub notification_type: String,
    pub booking_id: String,
    pub read: bool,
    pub created_at: Timestamp,
}

impl From<CustomerNotification> for NotificationRecord {
    fn from(row: CustomerNotification) -> Self {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        NotificationRecord {
            title: non_empty(row.title),
            message: non_empty(row.message),
            body: non_empty(row.body),
            booking_id: non_empty(row.booking_id),
            notification_type: non_empty(row.notification_type),
        }
    }
}
