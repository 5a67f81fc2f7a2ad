//! SendGrid-compatible mail API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error};

use crate::notifications::{
    MailerError,
    mailer::{EmailMessage, Mailer},
};

/// Default mail API base.
pub const DEFAULT_API_BASE: &str = "https://api.sendgrid.com";

/// Default sender address.
pub const DEFAULT_FROM_EMAIL: &str = "noreply@halfdrinks.com";

#[derive(Clone)]
pub struct SendGridConfig {
    pub api_base: String,
    pub api_key: String,
    pub from_email: String,
}

impl std::fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"**redacted**")
            .field("from_email", &self.from_email)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SendGridMailer {
    config: SendGridConfig,
    http: Client,
}

impl SendGridMailer {
    #[must_use]
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn request_body(&self, message: &EmailMessage) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": self.config.from_email },
            "subject": message.subject,
            "content": [
                { "type": "text/plain", "value": message.text },
                { "type": "text/html", "value": message.html },
            ],
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    #[tracing::instrument(name = "notifications.sendgrid.send", skip_all, err)]
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let url = format!(
            "{}/v3/mail/send",
            self.config.api_base.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(message))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            error!(%status, body = %text, "mail send rejected");

            return Err(MailerError::UnexpectedResponse(format!(
                "mail send failed with status {status}"
            )));
        }

        debug!(subject = %message.subject, "sent email");

        Ok(())
    }
}
