//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod customer_notification_repo;
pub mod customer_repo;

pub use customer_notification_repo::CustomerNotificationRepo;
pub use customer_repo::CustomerRepo;
