//! Notification intents: the decision to notify, before any message exists.

use std::collections::BTreeMap;

use crate::channels::{
    TYPE_NEW_BOOKING, TYPE_REASSIGNED, TYPE_RESCHEDULED, TYPE_RESUMED,
};

/// What a notification is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentKind {
    /// A different technician was assigned to the booking.
    Reassigned,
    /// The booking date or time changed.
    Rescheduled,
    /// A postponed booking went back in progress.
    Resumed,
    /// A booking was created (admin alert).
    NewBooking,
    /// A notification record written by someone else, carrying its own type.
    Generic(String),
}

impl IntentKind {
    /// The `type` value clients switch on.
    pub fn type_tag(&self) -> &str {
        match self {
            Self::Reassigned => TYPE_REASSIGNED,
            Self::Rescheduled => TYPE_RESCHEDULED,
            Self::Resumed => TYPE_RESUMED,
            Self::NewBooking => TYPE_NEW_BOOKING,
            Self::Generic(tag) => tag,
        }
    }
}

/// Who an intent is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A customer, reached through their notification log.
    Customer(String),
    /// Every device subscribed to the admin topic.
    AdminTopic,
    /// A single device, by push token.
    Device(String),
}

/// A decision to notify someone about a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    pub kind: IntentKind,
    pub recipient: Recipient,
    pub title: String,
    pub body: String,
    pub booking_id: String,
    /// Additional string data forwarded in the push payload.
    pub extra_data: BTreeMap<String, String>,
}

impl NotificationIntent {
    pub fn new(
        kind: IntentKind,
        recipient: Recipient,
        title: impl Into<String>,
        body: impl Into<String>,
        booking_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            recipient,
            title: title.into(),
            body: body.into(),
            booking_id: booking_id.into(),
            extra_data: BTreeMap::new(),
        }
    }

    /// Attach an extra data entry to the push payload.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }
}
