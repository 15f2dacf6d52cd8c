//! Transactional mail relay client.
//!
//! Delivers contact form submissions to the shop owner through an HTTP mail
//! relay. The relay expects a JSON payload and a bearer API key.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use pet_haven_core::Email;

use crate::config::MailerConfig;

/// Errors that can occur when sending mail through the relay.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay returned an error response.
    #[error("relay error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A contact form submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    /// Name the visitor entered.
    pub name: String,
    /// Visitor's reply-to address, already validated.
    pub email: Email,
    /// Free-form message body.
    pub message: String,
}

/// Mail relay client.
#[derive(Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    relay_url: String,
    from: String,
    contact_recipient: String,
}

impl MailerClient {
    /// Create a new mail relay client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MailerConfig) -> Result<Self, MailerError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| MailerError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            relay_url: config.relay_url.clone(),
            from: config.from.clone(),
            contact_recipient: config.contact_recipient.clone(),
        })
    }

    /// Forward a contact form submission to the shop owner.
    ///
    /// # Errors
    ///
    /// Returns `MailerError::Api` if the relay rejects the message.
    pub async fn send_contact_message(&self, msg: &ContactMessage) -> Result<(), MailerError> {
        let body = serde_json::json!({
            "from": self.from,
            "to": self.contact_recipient,
            "reply_to": msg.email.as_str(),
            "subject": format!("Contact form: {}", msg.name),
            "text": format!(
                "From: {} <{}>\n\n{}",
                msg.name,
                msg.email.as_str(),
                msg.message
            ),
        });

        let response = self.client.post(&self.relay_url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
