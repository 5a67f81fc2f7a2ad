//! Payment errors.

use thiserror::Error;

/// Errors that can occur when talking to the payment processor.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The processor returned a non-2xx response or an unexpected body.
    #[error("unexpected response from payment processor: {0}")]
    UnexpectedResponse(String),
}

/// Reasons a webhook delivery is rejected before any processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("signature header is malformed")]
    MalformedSignature,

    #[error("signature does not match payload")]
    InvalidSignature,

    #[error("signature timestamp is outside the tolerance window")]
    StaleTimestamp,

    #[error("webhook payload is not a valid event")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("payment intent has no usable order reference")]
    MissingOrderReference,
}
