//! Message construction: intents become push payloads or log entries.
//!
//! [`MessageBuilder::build`] is the single place where an intent's
//! recipient and kind are interpreted, so adding a recipient or kind fails
//! to compile until it is handled here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::channels::{ADMIN_TOPIC, CLICK_ACTION, CLICK_ACTION_KEY};
use crate::intent::{NotificationIntent, Recipient};

/// Data key carrying the booking id.
pub const DATA_BOOKING_ID: &str = "bookingId";

/// Data key carrying the notification type.
pub const DATA_TYPE: &str = "type";

/// Where a push message is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushTarget {
    Token(String),
    Topic(String),
}

/// The visible part of a push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

/// An outbound push message.
///
/// Serializes to the gateway's message shape, with the target flattened in
/// as either a `token` or a `topic` key. The data map is ordered so the
/// same intent always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    #[serde(flatten)]
    pub target: PushTarget,
    pub notification: PushNotification,
    pub data: BTreeMap<String, String>,
}

/// An entry appended to a customer's notification log.
///
/// `body` duplicates `message` for clients that read either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationLogEntry {
    pub title: String,
    pub message: String,
    pub body: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub booking_id: String,
    pub read: bool,
}

/// The result of building an intent: exactly one outbound artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Send directly through the push gateway.
    Push(PushMessage),
    /// Append to the customer's notification log.
    Log {
        customer_id: String,
        entry: NotificationLogEntry,
    },
}

/// Builds outbound artifacts from notification intents.
pub struct MessageBuilder;

impl MessageBuilder {
    /// Turn an intent into its single outbound artifact.
    pub fn build(intent: &NotificationIntent) -> Dispatch {
        match &intent.recipient {
            Recipient::Customer(customer_id) => Dispatch::Log {
                customer_id: customer_id.clone(),
                entry: Self::log_entry(intent),
            },
            Recipient::AdminTopic => {
                Dispatch::Push(Self::push(intent, PushTarget::Topic(ADMIN_TOPIC.to_string())))
            }
            Recipient::Device(token) => {
                Dispatch::Push(Self::push(intent, PushTarget::Token(token.clone())))
            }
        }
    }

    /// Build a push message for the intent, addressed to `target`.
    pub fn push(intent: &NotificationIntent, target: PushTarget) -> PushMessage {
        PushMessage {
            target,
            notification: PushNotification {
                title: intent.title.clone(),
                body: intent.body.clone(),
            },
            data: Self::data(intent),
        }
    }

    /// Build the log entry recorded for a customer-facing intent.
    pub fn log_entry(intent: &NotificationIntent) -> NotificationLogEntry {
        NotificationLogEntry {
            title: intent.title.clone(),
            message: intent.body.clone(),
            body: intent.body.clone(),
            notification_type: intent.kind.type_tag().to_string(),
            booking_id: intent.booking_id.clone(),
            read: false,
        }
    }

    /// The push data payload. Fixed keys win over extra data.
    fn data(intent: &NotificationIntent) -> BTreeMap<String, String> {
        let mut data = intent.extra_data.clone();
        data.insert(DATA_BOOKING_ID.to_string(), intent.booking_id.clone());
        data.insert(DATA_TYPE.to_string(), intent.kind.type_tag().to_string());
        data.insert(CLICK_ACTION_KEY.to_string(), CLICK_ACTION.to_string());
        data
    }
}
