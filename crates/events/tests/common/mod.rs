//! In-memory doubles for the dispatcher's collaborators.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use notifier_core::booking::{NotificationRecord, UserRecord};
use notifier_core::message::{NotificationLogEntry, PushMessage, PushTarget};
use notifier_events::{
    ChangeEvent, DeliveryError, Dispatcher, EventBus, NotificationLog, PushGateway, StoreError,
    UserStore,
};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryUsers {
    users: HashMap<String, UserRecord>,
    unavailable: bool,
}

impl MemoryUsers {
    pub fn with_user(mut self, user_id: &str, push_token: Option<&str>) -> Self {
        self.users.insert(
            user_id.to_string(),
            UserRecord {
                user_id: user_id.to_string(),
                push_token: push_token.map(str::to_string),
            },
        );
        self
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("user store offline".into()));
        }
        Ok(self.users.get(user_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Notification log
// ---------------------------------------------------------------------------

/// Records appends; optionally fails one type and announces appends on a bus.
#[derive(Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(String, NotificationLogEntry)>>,
    failing_type: Option<String>,
    bus: Option<Arc<EventBus>>,
}

impl MemoryLog {
    pub fn failing(notification_type: &str) -> Self {
        Self {
            failing_type: Some(notification_type.to_string()),
            ..Default::default()
        }
    }

    pub fn publishing_to(bus: Arc<EventBus>) -> Self {
        Self {
            bus: Some(bus),
            ..Default::default()
        }
    }

    pub fn entries(&self) -> Vec<(String, NotificationLogEntry)> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationLog for MemoryLog {
    async fn append(
        &self,
        customer_id: &str,
        entry: &NotificationLogEntry,
    ) -> Result<String, StoreError> {
        if self.failing_type.as_deref() == Some(entry.notification_type.as_str()) {
            return Err(StoreError::Unavailable("log write rejected".into()));
        }

        let id = {
            let mut entries = self.entries.lock().unwrap();
            entries.push((customer_id.to_string(), entry.clone()));
            entries.len().to_string()
        };

        if let Some(bus) = &self.bus {
            bus.publish(ChangeEvent::NotificationCreated {
                user_id: customer_id.to_string(),
                notification_id: id.clone(),
                record: NotificationRecord {
                    title: Some(entry.title.clone()),
                    message: Some(entry.message.clone()),
                    body: Some(entry.body.clone()),
                    booking_id: Some(entry.booking_id.clone()),
                    notification_type: Some(entry.notification_type.clone()),
                },
            });
        }

        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Push gateway
// ---------------------------------------------------------------------------

/// Records sent messages and forwards them on a channel for async assertions.
pub struct RecordingGateway {
    sent: Mutex<Vec<PushMessage>>,
    tx: mpsc::UnboundedSender<PushMessage>,
    fail: bool,
    panic_on_topic: bool,
}

impl RecordingGateway {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PushMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let gateway = Self {
            sent: Mutex::new(Vec::new()),
            tx,
            fail: false,
            panic_on_topic: false,
        };
        (gateway, rx)
    }

    pub fn failing() -> Self {
        let (mut gateway, _rx) = Self::new();
        gateway.fail = true;
        gateway
    }

    pub fn panicking_on_topic() -> (Self, mpsc::UnboundedReceiver<PushMessage>) {
        let (mut gateway, rx) = Self::new();
        gateway.panic_on_topic = true;
        (gateway, rx)
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send(&self, message: &PushMessage) -> Result<String, DeliveryError> {
        if self.panic_on_topic && matches!(message.target, PushTarget::Topic(_)) {
            panic!("gateway exploded");
        }
        if self.fail {
            return Err(DeliveryError::HttpStatus {
                status: 503,
                body: "unavailable".into(),
            });
        }

        let id = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            format!("projects/test/messages/{}", sent.len())
        };
        let _ = self.tx.send(message.clone());
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn dispatcher(
    users: MemoryUsers,
    log: Arc<MemoryLog>,
    gateway: Arc<RecordingGateway>,
) -> Dispatcher {
    Dispatcher::new(Arc::new(users), log, gateway)
}

/// Wait for the next message a gateway sends, failing the test after 5 s.
pub async fn next_sent(rx: &mut mpsc::UnboundedReceiver<PushMessage>) -> PushMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a push message")
        .expect("gateway channel closed")
}
