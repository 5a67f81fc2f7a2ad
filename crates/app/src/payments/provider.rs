//! Payment Provider

use async_trait::async_trait;
use mockall::automock;

use crate::{domain::orders::OrderUuid, payments::PaymentError};

/// Payment authorization to request for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    /// Amount in minor units.
    pub amount: u64,
    pub currency: String,
    pub order_uuid: OrderUuid,
    pub order_number: String,
}

/// Payment authorization created by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,

    /// Secret handed to the client to confirm the payment.
    pub client_secret: String,
}

#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Request a payment intent from the processor.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;
}
