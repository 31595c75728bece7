//! Change-event bus, routing and notification delivery.
//!
//! This crate wires the pure decision logic from `notifier_core` to the
//! outside world:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub for [`ChangeEvent`]s,
//!   backed by `tokio::sync::broadcast`.
//! - [`ChangeEventRouter`] -- background service that hands every event to
//!   the matching [`Dispatcher`] handler, one task per event.
//! - [`Dispatcher`] -- the three change handlers, holding explicit handles to
//!   the user store, notification log and push gateway.
//! - [`store`] -- store seams and their Postgres implementations.
//! - [`delivery`] -- push gateway seam and the FCM HTTP v1 client.

pub mod bus;
pub mod delivery;
pub mod dispatcher;
pub mod router;
pub mod store;

pub use bus::{ChangeEvent, EventBus};
pub use delivery::fcm::{FcmConfig, FcmGateway};
pub use delivery::{DeliveryError, DisabledGateway, PushGateway};
pub use dispatcher::{DispatchError, DispatchOutcome, Dispatcher, SkipReason, UpdateOutcome};
pub use router::ChangeEventRouter;
pub use store::postgres::{PgNotificationLog, PgUserStore};
pub use store::{NotificationLog, StoreError, UserStore};
