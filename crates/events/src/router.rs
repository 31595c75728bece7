//! Change-event routing service.
//!
//! [`ChangeEventRouter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and hands every [`ChangeEvent`] to the matching [`Dispatcher`] handler.
//! Each event runs in its own task, so a slow or panicking handler never
//! blocks or kills the loop.

use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::bus::ChangeEvent;
use crate::dispatcher::Dispatcher;

/// Background service that routes change events to handlers.
pub struct ChangeEventRouter {
    dispatcher: Dispatcher,
}

impl ChangeEventRouter {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run the routing loop.
    ///
    /// The loop exits when the bus is closed, or once `cancel` has fired and
    /// every in-flight handler has finished. While draining, events already
    /// queued on the bus are still routed: a booking update publishes its log
    /// entries as notification events, and those must reach the device
    /// before shutdown completes.
    pub async fn run(
        self,
        mut receiver: broadcast::Receiver<ChangeEvent>,
        cancel: CancellationToken,
    ) {
        let mut in_flight = JoinSet::new();
        let mut draining = false;

        loop {
            if draining && in_flight.is_empty() {
                // Handlers publish before they finish, so anything they
                // produced is already queued.
                match receiver.try_recv() {
                    Ok(event) => {
                        self.spawn(&mut in_flight, event);
                        continue;
                    }
                    Err(broadcast::error::TryRecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Change event router lagged while draining");
                        continue;
                    }
                    Err(_) => break,
                }
            }

            tokio::select! {
                _ = cancel.cancelled(), if !draining => {
                    tracing::info!(
                        in_flight = in_flight.len(),
                        "Change event router cancelled, draining handlers"
                    );
                    draining = true;
                }
                received = receiver.recv() => match received {
                    Ok(event) => self.spawn(&mut in_flight, event),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Change event router lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, change event router shutting down");
                        break;
                    }
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    reap(joined);
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            reap(joined);
        }
    }

    fn spawn(&self, in_flight: &mut JoinSet<()>, event: ChangeEvent) {
        let span = tracing::info_span!(
            "change_event",
            kind = %event.kind(),
            path = %event.path(),
        );
        in_flight.spawn(route(self.dispatcher.clone(), event).instrument(span));
    }
}

/// Forward one event to its handler.
pub async fn route(dispatcher: Dispatcher, event: ChangeEvent) {
    match event {
        ChangeEvent::NotificationCreated {
            user_id, record, ..
        } => {
            let outcome = dispatcher
                .handle_notification_created(&user_id, &record)
                .await;
            tracing::debug!(?outcome, "Notification handler finished");
        }
        ChangeEvent::BookingCreated { booking_id, record } => {
            let outcome = dispatcher.handle_booking_created(&booking_id, &record).await;
            tracing::debug!(?outcome, "Booking created handler finished");
        }
        ChangeEvent::BookingUpdated {
            booking_id,
            before,
            after,
        } => {
            let outcome = dispatcher
                .handle_booking_updated(&booking_id, &before, &after)
                .await;
            tracing::debug!(
                appended = outcome.appended.len(),
                failed = outcome.failed.len(),
                "Booking updated handler finished"
            );
        }
    }
}

fn reap(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            tracing::error!(error = %e, "Change event handler panicked");
        }
    }
}
