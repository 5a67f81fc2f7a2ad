//! Payments Config

use clap::Args;

use halfdrinks_app::{
    domain::checkout::DEFAULT_CURRENCY,
    payments::{StripeConfig, stripe::DEFAULT_API_BASE},
};

/// Payment processor settings.
///
/// Without a secret key checkout answers 503; without a webhook secret every
/// webhook delivery is rejected.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Processor secret API key
    #[arg(long = "payment-secret-key", env = "PAYMENT_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Webhook signing secret
    #[arg(long = "payment-webhook-secret", env = "PAYMENT_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,

    /// Processor API base URL
    #[arg(long = "payment-api-base", env = "PAYMENT_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// ISO currency code for payment intents
    #[arg(long = "payment-currency", env = "PAYMENT_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,
}

impl PaymentsConfig {
    pub(crate) fn stripe_config(&self) -> Option<StripeConfig> {
        self.secret_key.as_ref().map(|secret_key| StripeConfig {
            api_base: self.api_base.clone(),
            secret_key: secret_key.clone(),
        })
    }
}
