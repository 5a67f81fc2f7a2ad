//! Email Config

use clap::Args;

use halfdrinks_app::notifications::{
    SendGridConfig,
    sendgrid::{DEFAULT_API_BASE, DEFAULT_FROM_EMAIL},
};

/// Transactional email settings.
#[derive(Debug, Args)]
pub struct EmailConfig {
    /// `SendGrid` API key; confirmation emails are only logged when unset
    #[arg(long, env = "SENDGRID_API_KEY", hide_env_values = true)]
    pub sendgrid_api_key: Option<String>,

    /// Sender address
    #[arg(long, env = "FROM_EMAIL", default_value = DEFAULT_FROM_EMAIL)]
    pub from_email: String,

    /// Email API base URL
    #[arg(long, env = "EMAIL_API_BASE", default_value = DEFAULT_API_BASE)]
    pub email_api_base: String,
}

impl EmailConfig {
    pub(crate) fn sendgrid_config(&self) -> Option<SendGridConfig> {
        self.sendgrid_api_key.as_ref().map(|api_key| SendGridConfig {
            api_base: self.email_api_base.clone(),
            api_key: api_key.clone(),
            from_email: self.from_email.clone(),
        })
    }
}
