//! Change handlers.
//!
//! [`Dispatcher`] owns explicit handles to the user store, the notification
//! log and the push gateway. Every handler terminates normally whatever
//! happens downstream: missing recipients are skipped, store and gateway
//! failures are logged and reported in the returned outcome, never
//! propagated to the caller.

use std::sync::Arc;

use futures::future::join_all;
use notifier_core::booking::{NotificationRecord, ServiceRequestRecord};
use notifier_core::intent::NotificationIntent;
use notifier_core::message::{Dispatch, MessageBuilder};
use notifier_core::policy::NotificationPolicy;

use crate::delivery::{DeliveryError, PushGateway};
use crate::store::{NotificationLog, StoreError, UserStore};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a push was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UserNotFound,
    NoPushToken,
}

/// Result of a handler that sends at most one push message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { message_id: String },
    Skipped(SkipReason),
    Failed { error: String },
}

impl DispatchOutcome {
    /// `false` only when a store lookup or delivery failed.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Result of a booking update: one log append per fired rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// `(type, log entry id)` for each entry written.
    pub appended: Vec<(String, String)>,
    /// `(type, error)` for each append that failed.
    pub failed: Vec<(String, String)>,
}

/// Failure while dispatching a single intent.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// The three change handlers and the collaborators they write to.
///
/// Cheaply cloneable; clones share the same store and gateway handles.
#[derive(Clone)]
pub struct Dispatcher {
    users: Arc<dyn UserStore>,
    log: Arc<dyn NotificationLog>,
    gateway: Arc<dyn PushGateway>,
}

impl Dispatcher {
    pub fn new(
        users: Arc<dyn UserStore>,
        log: Arc<dyn NotificationLog>,
        gateway: Arc<dyn PushGateway>,
    ) -> Self {
        Self {
            users,
            log,
            gateway,
        }
    }

    /// Push a newly created notification record to the owner's device.
    pub async fn handle_notification_created(
        &self,
        user_id: &str,
        record: &NotificationRecord,
    ) -> DispatchOutcome {
        tracing::info!(user_id, "New notification for user");

        let user = match self.users.find_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!(user_id, "User document not found");
                return DispatchOutcome::Skipped(SkipReason::UserNotFound);
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to look up user");
                return DispatchOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let Some(push_token) = user.push_token.as_deref() else {
            tracing::info!(user_id, "No push token found for user");
            return DispatchOutcome::Skipped(SkipReason::NoPushToken);
        };

        let intent = NotificationPolicy::on_notification_created(record, push_token);
        match self.dispatch(&intent).await {
            Ok(message_id) => {
                tracing::info!(user_id, message_id = %message_id, "Successfully sent message");
                DispatchOutcome::Sent { message_id }
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Error sending notification");
                DispatchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Alert the admin topic about a new booking.
    pub async fn handle_booking_created(
        &self,
        booking_id: &str,
        record: &ServiceRequestRecord,
    ) -> DispatchOutcome {
        tracing::info!(booking_id, "New booking created");

        let intent = NotificationPolicy::on_booking_created(booking_id, record);
        match self.dispatch(&intent).await {
            Ok(message_id) => {
                tracing::info!(
                    booking_id,
                    message_id = %message_id,
                    "Successfully sent admin notification"
                );
                DispatchOutcome::Sent { message_id }
            }
            Err(e) => {
                tracing::error!(booking_id, error = %e, "Error sending admin notification");
                DispatchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Log customer-facing notifications for a booking update.
    ///
    /// Each fired rule is appended independently and concurrently; a failed
    /// append is logged and does not stop the others.
    pub async fn handle_booking_updated(
        &self,
        booking_id: &str,
        before: &ServiceRequestRecord,
        after: &ServiceRequestRecord,
    ) -> UpdateOutcome {
        if after.customer_id.is_none() {
            tracing::debug!(booking_id, "Booking has no customer, nothing to notify");
            return UpdateOutcome::default();
        }

        let intents = NotificationPolicy::on_booking_updated(booking_id, before, after);
        let results = join_all(intents.iter().map(|intent| self.dispatch(intent))).await;

        let mut outcome = UpdateOutcome::default();
        for (intent, result) in intents.iter().zip(results) {
            let notification_type = intent.kind.type_tag().to_string();
            match result {
                Ok(entry_id) => {
                    tracing::info!(
                        booking_id,
                        notification_type = %notification_type,
                        entry_id = %entry_id,
                        "Customer notification logged"
                    );
                    outcome.appended.push((notification_type, entry_id));
                }
                Err(e) => {
                    tracing::error!(
                        booking_id,
                        notification_type = %notification_type,
                        error = %e,
                        "Failed to log customer notification"
                    );
                    outcome.failed.push((notification_type, e.to_string()));
                }
            }
        }
        outcome
    }

    /// Hand one intent to the collaborator its recipient calls for.
    ///
    /// Returns the push message id or the log entry id.
    async fn dispatch(&self, intent: &NotificationIntent) -> Result<String, DispatchError> {
        match MessageBuilder::build(intent) {
            Dispatch::Push(message) => Ok(self.gateway.send(&message).await?),
            Dispatch::Log { customer_id, entry } => {
                Ok(self.log.append(&customer_id, &entry).await?)
            }
        }
    }
}
