//! Repository for the `customer_notifications` table.

use notifier_core::message::NotificationLogEntry;
use sqlx::PgPool;

use crate::models::customer_notification::CustomerNotification;

/// Column list for `customer_notifications` queries.
const COLUMNS: &str =
    "id, customer_id, title, message, body, type, booking_id, read, created_at";

/// Append-only access to customer notification logs.
pub struct CustomerNotificationRepo;

impl CustomerNotificationRepo {
    /// Append an entry to a customer's log, returning the stored row.
    ///
    /// `created_at` is assigned by the database.
    pub async fn append(
        pool: &PgPool,
        customer_id: &str,
        entry: &NotificationLogEntry,
    ) -> Result<CustomerNotification, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_notifications \
             (customer_id, title, message, body, type, booking_id, read) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomerNotification>(&query)
            .bind(customer_id)
            .bind(&entry.title)
            .bind(&entry.message)
            .bind(&entry.body)
            .bind(&entry.notification_type)
            .bind(&entry.booking_id)
            .bind(entry.read)
            .fetch_one(pool)
            .await
    }
}
