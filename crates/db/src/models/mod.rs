pub mod customer;
pub mod customer_notification;
