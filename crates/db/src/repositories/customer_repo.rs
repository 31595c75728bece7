//! Repository for the `customers` table.

use sqlx::PgPool;

use crate::models::customer::Customer;

/// Column list for `customers` queries.
const COLUMNS: &str = "id, push_token, created_at, updated_at";

/// Read access to customer documents.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Find a customer by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
