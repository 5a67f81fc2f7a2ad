//! Server configuration module

use clap::Parser;

use halfdrinks_app::context::Integrations;

use crate::config::{
    db::DatabaseConfig,
    email::EmailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    payments::PaymentsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod email;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// 1/2 Drinks JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "halfdrinks-json", about = "1/2 Drinks JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Payment processor settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Transactional email settings.
    #[command(flatten)]
    pub email: EmailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Integration settings handed to the application context.
    #[must_use]
    pub fn integrations(&self) -> Integrations {
        Integrations {
            payments: self.payments.stripe_config(),
            currency: self.payments.currency.clone(),
            webhook_secret: self.payments.webhook_secret.clone(),
            email: self.email.sendgrid_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 3] = ["halfdrinks-json", "--database-url", "postgres://localhost/halfdrinks"];

    #[test]
    fn defaults_leave_integrations_unconfigured() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;
        let integrations = config.integrations();

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert!(integrations.payments.is_none(), "no secret key, no processor");
        assert!(integrations.webhook_secret.is_none(), "no webhook secret");
        assert!(integrations.email.is_none(), "no api key, no mailer");
        assert_eq!(integrations.currency, "usd");

        Ok(())
    }

    #[test]
    fn secrets_enable_integrations() -> TestResult {
        let config = ServerConfig::try_parse_from(
            REQUIRED.into_iter().chain([
                "--payment-secret-key",
                "sk_test_123",
                "--payment-webhook-secret",
                "whsec_123",
                "--sendgrid-api-key",
                "SG.key",
                "--from-email",
                "orders@halfdrinks.com",
            ]),
        )?;

        let integrations = config.integrations();

        assert_eq!(
            integrations.payments.map(|payments| payments.api_base),
            Some("https://api.stripe.com/v1".to_string())
        );
        assert_eq!(integrations.webhook_secret.as_deref(), Some("whsec_123"));
        assert_eq!(
            integrations.email.map(|email| email.from_email),
            Some("orders@halfdrinks.com".to_string())
        );

        Ok(())
    }
}
