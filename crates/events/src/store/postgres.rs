//! Postgres-backed stores.

use std::sync::Arc;

use async_trait::async_trait;
use notifier_core::booking::UserRecord;
use notifier_core::message::NotificationLogEntry;
use notifier_db::repositories::{CustomerNotificationRepo, CustomerRepo};
use notifier_db::DbPool;

use crate::bus::{ChangeEvent, EventBus};
use crate::store::{NotificationLog, StoreError, UserStore};

/// Reads customers from the `customers` table.
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let customer = CustomerRepo::find_by_id(&self.pool, user_id).await?;
        Ok(customer.map(UserRecord::from))
    }
}

/// Appends to `customer_notifications` and announces each new row on the bus.
///
/// The announcement is what triggers device delivery: the router picks up
/// the resulting [`ChangeEvent::NotificationCreated`] like any other
/// notification written to the log.
pub struct PgNotificationLog {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl PgNotificationLog {
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }
}

#[async_trait]
impl NotificationLog for PgNotificationLog {
    async fn append(
        &self,
        customer_id: &str,
        entry: &NotificationLogEntry,
    ) -> Result<String, StoreError> {
        let row = CustomerNotificationRepo::append(&self.pool, customer_id, entry).await?;
        let notification_id = row.id.to_string();

        let receivers = self.bus.publish(ChangeEvent::NotificationCreated {
            user_id: row.customer_id.clone(),
            notification_id: notification_id.clone(),
            record: row.into(),
        });
        if receivers == 0 {
            tracing::warn!(
                customer_id,
                notification_id = %notification_id,
                "Notification logged but no router is listening"
            );
        }

        Ok(notification_id)
    }
}
