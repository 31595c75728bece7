//! Customer entity model.

use notifier_core::booking::UserRecord;
use notifier_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: String,
    pub push_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Customer> for UserRecord {
    fn from(customer: Customer) -> Self {
        UserRecord {
            user_id: customer.id,
            // Clients clear the token by writing an empty string.
            push_token: customer.push_token.filter(|t| !t.is_empty()),
        }
    }
}
