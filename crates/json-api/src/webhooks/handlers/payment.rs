//! Payment Webhook Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use halfdrinks_app::{
    domain::{
        orders::PaymentEvent,
        settlement::{PaymentNotification, SettlementError},
    },
    payments::{PaymentWebhookEvent, SIGNATURE_HEADER},
};

use crate::{
    extensions::*,
    observability::record_webhook_event,
    state::State,
    webhooks::errors::{into_status_error, verification_error},
};

/// Webhook Acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookResponse {
    pub received: bool,

    /// Order status after this delivery, when it concerned an order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

const fn event_label(event: PaymentEvent) -> &'static str {
    match event {
        PaymentEvent::Succeeded => "payment_intent.succeeded",
        PaymentEvent::Failed => "payment_intent.payment_failed",
    }
}

/// Payment Webhook Handler
///
/// Verifies the `stripe-signature` header against the raw body, then settles
/// the referenced order. Duplicate deliveries are acknowledged as no-ops.
#[endpoint(
    tags("webhooks"),
    summary = "Payment Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Delivery processed or ignored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unverifiable delivery"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WebhookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(verifier) = state.app.webhooks.as_ref() else {
        record_webhook_event("unknown", "rejected");

        return Err(StatusError::bad_request().brief("Webhook secret not configured"));
    };

    let Some(header) = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
    else {
        record_webhook_event("unknown", "rejected");

        return Err(StatusError::bad_request().brief("Missing webhook signature"));
    };

    let payload = req.payload().await.or_400("failed to read webhook body")?;

    let event = match verifier.construct_event(payload, &header, Timestamp::now()) {
        Ok(event) => event,
        Err(error) => {
            record_webhook_event("unknown", "rejected");

            return Err(verification_error(&error));
        }
    };

    let (event_id, event, intent_id, order_uuid) = match event {
        PaymentWebhookEvent::PaymentIntent {
            event_id,
            event,
            intent_id,
            order_uuid,
        } => (event_id, event, intent_id, order_uuid),
        PaymentWebhookEvent::Ignored {
            event_id,
            event_type,
        } => {
            info!(%event_id, %event_type, "ignored payment webhook");
            record_webhook_event("other", "ignored");

            return Ok(Json(WebhookResponse {
                received: true,
                status: None,
            }));
        }
    };

    let label = event_label(event);

    let result = state
        .app
        .settlement
        .settle(PaymentNotification {
            event,
            intent_id,
            order_uuid,
        })
        .await;

    match result {
        Ok(settlement) => {
            info!(
                %event_id,
                order_uuid = %settlement.order_uuid,
                status = %settlement.status,
                loyalty_points = settlement.loyalty_points,
                "settled order"
            );

            if !settlement.short_products.is_empty() {
                warn!(
                    order_uuid = %settlement.order_uuid,
                    short_products = ?settlement.short_products,
                    "paid order has lines without stock"
                );
            }

            record_webhook_event(label, "settled");

            Ok(Json(WebhookResponse {
                received: true,
                status: Some(settlement.status.as_str().to_string()),
            }))
        }
        Err(SettlementError::AlreadySettled(status)) => {
            info!(%event_id, %order_uuid, %status, "duplicate payment webhook");
            record_webhook_event(label, "duplicate");

            Ok(Json(WebhookResponse {
                received: true,
                status: Some(status.as_str().to_string()),
            }))
        }
        Err(error) => {
            record_webhook_event(label, "failed");

            Err(into_status_error(error))
        }
    }
}
