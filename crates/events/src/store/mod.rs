//! Store seams used by the dispatcher.
//!
//! The dispatcher only sees these traits, so handlers can run against
//! Postgres in production and in-memory doubles in tests.

pub mod postgres;

use async_trait::async_trait;
use notifier_core::booking::UserRecord;
use notifier_core::message::NotificationLogEntry;

/// Error type for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached for a reason outside the database driver.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to customer documents.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by id. `Ok(None)` means the user does not exist.
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;
}

/// Append-only access to customer notification logs.
#[async_trait]
pub trait NotificationLog: Send + Sync {
    /// Append `entry` to the log of `customer_id`, returning the new entry id.
    ///
    /// Implementations must report the append as a notification-created
    /// change so the entry reaches the customer's device.
    async fn append(
        &self,
        customer_id: &str,
        entry: &NotificationLogEntry,
    ) -> Result<String, StoreError>;
}
