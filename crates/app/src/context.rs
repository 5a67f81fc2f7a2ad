//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartRepository, StoredCartsService},
        checkout::{CheckoutService, DEFAULT_CURRENCY, PgCheckoutService},
        newsletter::{NewsletterService, PgNewsletterService},
        products::{PgProductsService, ProductsService},
        settlement::{PgSettlementService, SettlementService},
    },
    notifications::{LogMailer, Mailer, SendGridConfig, SendGridMailer},
    payments::{PaymentProvider, StripeClient, StripeConfig, WebhookVerifier},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// External integrations. Unset integrations degrade: checkout answers
/// unavailable, webhooks are rejected and emails are logged instead of sent.
#[derive(Debug, Clone)]
pub struct Integrations {
    pub payments: Option<StripeConfig>,
    pub currency: String,
    pub webhook_secret: Option<String>,
    pub email: Option<SendGridConfig>,
}

impl Default for Integrations {
    fn default() -> Self {
        Self {
            payments: None,
            currency: DEFAULT_CURRENCY.to_string(),
            webhook_secret: None,
            email: None,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub settlement: Arc<dyn SettlementService>,
    pub newsletter: Arc<dyn NewsletterService>,
    pub auth: Arc<dyn AuthService>,
    pub webhooks: Option<WebhookVerifier>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("webhooks", &self.webhooks)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        integrations: Integrations,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), integrations))
    }

    #[must_use]
    pub fn from_db(db: Db, integrations: Integrations) -> Self {
        let payments = integrations
            .payments
            .map(|config| Arc::new(StripeClient::new(config)) as Arc<dyn PaymentProvider>);

        let mailer: Arc<dyn Mailer> = match integrations.email {
            Some(config) => Arc::new(SendGridMailer::new(config)),
            None => Arc::new(LogMailer),
        };

        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));

        Self {
            carts: Arc::new(StoredCartsService::new(
                PgCartRepository::new(db.clone()),
                Arc::clone(&products),
            )),
            checkout: Arc::new(PgCheckoutService::new(
                db.clone(),
                payments,
                integrations.currency,
            )),
            settlement: Arc::new(PgSettlementService::new(db.clone(), mailer)),
            newsletter: Arc::new(PgNewsletterService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db)),
            webhooks: integrations.webhook_secret.map(WebhookVerifier::new),
            products,
        }
    }
}
