//! Mail client — the single point of entry for transactional email.
//! Wraps the provider's `POST /emails` endpoint; returns the provider's
//! message id so callers can surface it to the dashboard.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const MAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
pub struct OutboundEmail<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Clone)]
pub struct MailClient {
    http: Client,
    api_key: String,
}

impl MailClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Sends one email and returns the provider's message id.
    pub async fn send(&self, email: &OutboundEmail<'_>) -> Result<String, MailError> {
        let response = self
            .http
            .post(MAIL_API_URL)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SendResponse = response.json().await?;
        debug!("Sent email to {}: provider id {}", email.to, parsed.id);
        Ok(parsed.id)
    }
}
