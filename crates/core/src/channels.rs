//! Well-known push channel and notification type constants.
//!
//! These must match the values the mobile clients subscribe to and switch
//! on when a push message is opened.

/// Topic subscribed to by every admin device.
pub const ADMIN_TOPIC: &str = "admin_notifications";

/// Data key carrying the client-side routing marker.
pub const CLICK_ACTION_KEY: &str = "click_action";

/// Client-side routing marker attached to every push message.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// Notification type used when a notification record carries none.
pub const TYPE_GENERAL: &str = "general";

/// Notification type for admin alerts about newly created bookings.
pub const TYPE_NEW_BOOKING: &str = "new_booking";

/// Notification type for a technician change on a booking.
pub const TYPE_REASSIGNED: &str = "reassigned";

/// Notification type for a date or time change on a booking.
pub const TYPE_RESCHEDULED: &str = "rescheduled";

/// Notification type for a postponed booking going back in progress.
pub const TYPE_RESUMED: &str = "resumed";

/// Title used when a notification record carries none.
pub const DEFAULT_TITLE: &str = "New Notification";
