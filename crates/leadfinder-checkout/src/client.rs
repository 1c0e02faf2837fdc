//! HTTP client for the Stripe Checkout Sessions API.
//!
//! Wraps `reqwest` with bearer-key authentication, form encoding, and typed
//! error handling. Provider-side failures surface as [`CheckoutError::Api`]
//! carrying the provider's message.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::CheckoutError;
use crate::session::CheckoutRequest;
use crate::types::{CheckoutSession, ErrorEnvelope};

const DEFAULT_BASE_URL: &str = "https://api.stripe.com/";
const SESSIONS_PATH: &str = "v1/checkout/sessions";

/// Client for creating payment checkout sessions.
///
/// Use [`StripeClient::new`] for production or [`StripeClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: Url,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("base_url", &self.base_url.as_str())
            .field("secret_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(secret_key: &str, timeout_secs: u64) -> Result<Self, CheckoutError> {
        Self::with_base_url(secret_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CheckoutError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        secret_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CheckoutError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadfinder/0.1 (checkout)")
            .build()?;

        // A trailing slash makes `Url::join` append rather than replace the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CheckoutError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            secret_key: secret_key.to_owned(),
            base_url,
        })
    }

    /// Creates a one-line-item payment session.
    ///
    /// No retry is attempted; the caller decides how to report failures.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Api`] if the provider answers with a non-2xx status.
    /// - [`CheckoutError::Http`] on network failure.
    /// - [`CheckoutError::Deserialize`] if a success body lacks a session id.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let url = self.sessions_url()?;
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.secret_key)
            .form(&request.form_fields())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = Self::error_message(&body)
                .unwrap_or_else(|| format!("unexpected HTTP status {}", status.as_u16()));
            tracing::error!(status = status.as_u16(), %message, "checkout session creation failed");
            return Err(CheckoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession =
            serde_json::from_str(&body).map_err(|e| CheckoutError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        tracing::info!(
            session_id = %session.id,
            quantity = request.quantity,
            "created checkout session"
        );
        Ok(session)
    }

    fn sessions_url(&self) -> Result<Url, CheckoutError> {
        self.base_url
            .join(SESSIONS_PATH)
            .map_err(|e| CheckoutError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Extracts `error.message` from a provider error body, if present.
    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .filter(|m| !m.is_empty())
    }
}
