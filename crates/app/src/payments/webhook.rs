//! Payment webhook verification and event parsing.
//!
//! Deliveries carry a `stripe-signature: t=<unix>,v1=<hex>` header where the
//! signature is the hex HMAC-SHA256 of `"{t}.{raw body}"` keyed with the
//! endpoint secret.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use jiff::Timestamp;
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    domain::orders::{OrderUuid, PaymentEvent},
    payments::WebhookError,
};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum age, in seconds, of a signed delivery.
pub const SIGNATURE_TOLERANCE_SECONDS: i64 = 300;

const PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";
const PAYMENT_FAILED: &str = "payment_intent.payment_failed";

/// A verified delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentWebhookEvent {
    /// A payment intent succeeded or failed.
    PaymentIntent {
        event_id: String,
        event: PaymentEvent,
        intent_id: String,
        order_uuid: OrderUuid,
    },

    /// Any event type the storefront does not act on.
    Ignored { event_id: String, event_type: String },
}

/// Verifies webhook signatures with the endpoint secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
    tolerance_seconds: i64,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"**redacted**")
            .field("tolerance_seconds", &self.tolerance_seconds)
            .finish()
    }
}

impl WebhookVerifier {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_seconds: SIGNATURE_TOLERANCE_SECONDS,
        }
    }

    /// Check the signature header against the raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::MalformedSignature`] if the header lacks a
    /// timestamp or `v1` signature, [`WebhookError::InvalidSignature`] if no
    /// signature matches and [`WebhookError::StaleTimestamp`] if the delivery
    /// is older (or newer) than the tolerance allows.
    pub fn verify(
        &self,
        payload: &[u8],
        header: &str,
        now: Timestamp,
    ) -> Result<(), WebhookError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = Some(value),
                Some(("v1", value)) => signatures.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(WebhookError::MalformedSignature)?;

        if signatures.is_empty() {
            return Err(WebhookError::MalformedSignature);
        }

        let matched = signatures.iter().any(|signature| {
            hex::decode(signature).is_ok_and(|expected| {
                self.mac(timestamp, payload)
                    .is_some_and(|mac| mac.verify_slice(&expected).is_ok())
            })
        });

        if !matched {
            warn!("webhook signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }

        let signed_at: i64 = timestamp
            .parse()
            .map_err(|_| WebhookError::MalformedSignature)?;

        if (now.as_second() - signed_at).abs() > self.tolerance_seconds {
            warn!(signed_at, now = now.as_second(), "webhook timestamp outside tolerance");
            return Err(WebhookError::StaleTimestamp);
        }

        Ok(())
    }

    /// Verify a delivery and parse it into a [`PaymentWebhookEvent`].
    ///
    /// # Errors
    ///
    /// Returns any verification error, [`WebhookError::InvalidPayload`] for
    /// a body that is not an event and [`WebhookError::MissingOrderReference`]
    /// for payment intent events without a valid `metadata.order_uuid`.
    pub fn construct_event(
        &self,
        payload: &[u8],
        header: &str,
        now: Timestamp,
    ) -> Result<PaymentWebhookEvent, WebhookError> {
        self.verify(payload, header, now)?;

        parse_event(payload)
    }

    fn mac(&self, timestamp: &str, payload: &[u8]) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;

        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);

        Some(mac)
    }
}

fn parse_event(payload: &[u8]) -> Result<PaymentWebhookEvent, WebhookError> {
    let raw: RawEvent = serde_json::from_slice(payload)?;

    let event = match raw.event_type.as_str() {
        PAYMENT_SUCCEEDED => PaymentEvent::Succeeded,
        PAYMENT_FAILED => PaymentEvent::Failed,
        _ => {
            debug!(event_type = %raw.event_type, "ignoring webhook event");

            return Ok(PaymentWebhookEvent::Ignored {
                event_id: raw.id,
                event_type: raw.event_type,
            });
        }
    };

    let intent: RawPaymentIntent = serde_json::from_value(raw.data.object)?;

    let order_uuid = intent
        .metadata
        .get("order_uuid")
        .and_then(|value| Uuid::try_parse(value).ok())
        .map(OrderUuid::from_uuid)
        .ok_or(WebhookError::MissingOrderReference)?;

    Ok(PaymentWebhookEvent::PaymentIntent {
        event_id: raw.id,
        event,
        intent_id: intent.id,
        order_uuid,
    })
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawPaymentIntent {
    id: String,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}
