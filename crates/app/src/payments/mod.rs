//! Payment processor integration: payment intent creation and webhook
//! verification for a Stripe-compatible API.

mod errors;
pub mod provider;
pub mod stripe;
pub mod webhook;

pub use errors::{PaymentError, WebhookError};
pub use provider::*;
pub use stripe::{StripeClient, StripeConfig};
pub use webhook::{PaymentWebhookEvent, SIGNATURE_HEADER, WebhookVerifier};
