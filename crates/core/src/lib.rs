//! Domain types and pure decision logic for booking notifications.
//!
//! Nothing in this crate performs I/O. It defines the records observed on
//! the document store, the [`policy`] that turns record changes into
//! [`intent::NotificationIntent`]s, and the [`message`] builder that turns
//! intents into push payloads and notification-log entries.

pub mod booking;
pub mod channels;
pub mod document;
pub mod error;
pub mod fields;
pub mod intent;
pub mod message;
pub mod policy;
pub mod types;
