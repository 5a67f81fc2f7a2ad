//! Mailer

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::notifications::MailerError;

/// A rendered email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Mailer used when no email API is configured. Messages are logged and
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        info!(to = %message.to, subject = %message.subject, "email delivery not configured, skipping");

        Ok(())
    }
}
