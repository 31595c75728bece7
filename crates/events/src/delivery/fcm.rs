//! FCM HTTP v1 push delivery.
//!
//! [`FcmGateway`] posts a [`PushMessage`] to
//! `{base_url}/v1/projects/{project_id}/messages:send` with a bearer token
//! and returns the `name` the gateway assigns to the message. There is no
//! retry: a failed send is reported once and left to the caller to log.

use std::time::Duration;

use async_trait::async_trait;
use notifier_core::message::PushMessage;
use serde::{Deserialize, Serialize};

use crate::delivery::{DeliveryError, PushGateway};

// ---------------------------------------------------------------------------
// FcmConfig
// ---------------------------------------------------------------------------

/// Default FCM API origin.
const DEFAULT_BASE_URL: &str = "https://fcm.googleapis.com";

/// Default HTTP timeout for a single send.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the FCM HTTP v1 client.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// Firebase project id the messages are sent through.
    pub project_id: String,
    /// OAuth2 bearer token with the `firebase.messaging` scope.
    pub access_token: String,
    /// API origin, overridable for emulators and tests.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl FcmConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `FCM_PROJECT_ID` or `FCM_ACCESS_TOKEN` is not set,
    /// signalling that push delivery is not configured.
    ///
    /// | Variable           | Required | Default                      |
    /// |--------------------|----------|------------------------------|
    /// | `FCM_PROJECT_ID`   | yes      | none                         |
    /// | `FCM_ACCESS_TOKEN` | yes      | none                         |
    /// | `FCM_BASE_URL`     | no       | `https://fcm.googleapis.com` |
    /// | `FCM_TIMEOUT_SECS` | no       | `10`                         |
    pub fn from_env() -> Option<Self> {
        let project_id = std::env::var("FCM_PROJECT_ID").ok()?;
        let access_token = std::env::var("FCM_ACCESS_TOKEN").ok()?;
        Some(Self {
            project_id,
            access_token,
            base_url: std::env::var("FCM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("FCM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }

    /// The `messages:send` endpoint for this project.
    pub fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url.trim_end_matches('/'),
            self.project_id
        )
    }
}

// ---------------------------------------------------------------------------
// FcmGateway
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

#[derive(Deserialize)]
struct SendResponse {
    name: Option<String>,
}

/// Sends push messages through FCM HTTP v1.
pub struct FcmGateway {
    client: reqwest::Client,
    send_url: String,
    access_token: String,
}

impl FcmGateway {
    /// Create a gateway with a pre-configured HTTP client.
    pub fn new(config: FcmConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            send_url: config.send_url(),
            access_token: config.access_token,
        })
    }
}

#[async_trait]
impl PushGateway for FcmGateway {
    async fn send(&self, message: &PushMessage) -> Result<String, DeliveryError> {
        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .json(&SendRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SendResponse = response.json().await?;
        parsed.name.ok_or(DeliveryError::MissingMessageId)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
