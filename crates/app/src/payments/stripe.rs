//! Stripe-compatible REST client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::payments::{
    PaymentError,
    provider::{PaymentIntent, PaymentIntentRequest, PaymentProvider},
};

/// Default processor API base.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

/// Configuration for connecting to the payment processor.
#[derive(Clone)]
pub struct StripeConfig {
    /// API base including the version segment, e.g. `"https://api.stripe.com/v1"`.
    pub api_base: String,

    /// Secret API key, sent as the basic auth username.
    pub secret_key: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_base", &self.api_base)
            .field("secret_key", &"**redacted**")
            .finish()
    }
}

/// HTTP client for creating payment intents.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl StripeClient {
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[tracing::instrument(
        name = "payments.stripe.create_payment_intent",
        skip(self, request),
        fields(order_uuid = %request.order_uuid, amount = request.amount),
        err
    )]
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!(
            "{}/payment_intents",
            self.config.api_base.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&payment_intent_form(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            error!(%status, body = %text, "payment intent request rejected");

            return Err(PaymentError::UnexpectedResponse(format!(
                "payment intent request failed with status {status}"
            )));
        }

        let parsed: PaymentIntentResponse = response.json().await?;

        let client_secret = parsed.client_secret.ok_or_else(|| {
            PaymentError::UnexpectedResponse("payment intent has no client secret".to_string())
        })?;

        debug!(intent_id = %parsed.id, "created payment intent");

        Ok(PaymentIntent {
            id: parsed.id,
            client_secret,
        })
    }
}

/// Form body for `POST /payment_intents`.
fn payment_intent_form(request: &PaymentIntentRequest) -> Vec<(&'static str, String)> {
    vec![
        ("amount", request.amount.to_string()),
        ("currency", request.currency.to_lowercase()),
        ("automatic_payment_methods[enabled]", "true".to_string()),
        ("metadata[order_uuid]", request.order_uuid.to_string()),
        ("metadata[order_number]", request.order_number.clone()),
    ]
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::domain::orders::OrderUuid;

    use super::*;

    #[test]
    fn form_carries_amount_currency_and_order_metadata() {
        let order_uuid = OrderUuid::new();
        let request = PaymentIntentRequest {
            amount: 3_159,
            currency: "USD".to_string(),
            order_uuid,
            order_number: "ORD-1-ABCDEFGHI".to_string(),
        };

        let form = payment_intent_form(&request);

        assert!(form.contains(&("amount", "3159".to_string())));
        assert!(form.contains(&("currency", "usd".to_string())));
        assert!(form.contains(&("metadata[order_uuid]", order_uuid.to_string())));
        assert!(form.contains(&("metadata[order_number]", "ORD-1-ABCDEFGHI".to_string())));
    }

    #[test]
    fn debug_output_redacts_secret_key() {
        let config = StripeConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            secret_key: "sk_test_123".to_string(),
        };

        let rendered = format!("{:?}", StripeClient::new(config));

        assert!(!rendered.contains("sk_test_123"), "leaked secret: {rendered}");
    }
}
