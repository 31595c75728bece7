//! Push gateway seam.
//!
//! [`PushGateway`] sends one message and reports the gateway's message id.
//! Each call is a single attempt; callers log failures and move on.

pub mod fcm;

use async_trait::async_trait;
use notifier_core::message::PushMessage;

/// Error type for push delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status code.
    #[error("Push gateway returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The gateway accepted the message but returned no message id.
    #[error("Push gateway response did not include a message id")]
    MissingMessageId,

    /// No gateway credentials were configured.
    #[error("Push gateway is not configured")]
    NotConfigured,
}

/// Sends push messages to devices and topics.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Send `message`, returning the gateway-assigned message id.
    async fn send(&self, message: &PushMessage) -> Result<String, DeliveryError>;
}

/// Gateway used when no push credentials are configured. Every send fails.
pub struct DisabledGateway;

#[async_trait]
impl PushGateway for DisabledGateway {
    async fn send(&self, _message: &PushMessage) -> Result<String, DeliveryError> {
        Err(DeliveryError::NotConfigured)
    }
}
