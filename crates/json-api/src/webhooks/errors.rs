//! Webhook Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use halfdrinks_app::{domain::settlement::SettlementError, payments::WebhookError};

/// Deliveries that fail verification are rejected without processing.
pub(crate) fn verification_error(error: &WebhookError) -> StatusError {
    warn!("rejected payment webhook: {error}");

    StatusError::bad_request()
        .brief("Invalid webhook")
        .detail(error.to_string())
}

pub(crate) fn into_status_error(error: SettlementError) -> StatusError {
    match error {
        SettlementError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        SettlementError::IntentMismatch => StatusError::bad_request()
            .brief("Invalid webhook")
            .detail("Payment intent does not belong to the order"),
        SettlementError::AlreadySettled(status) => {
            // Duplicates are acknowledged by the handler before reaching here.
            warn!(%status, "order already settled");

            StatusError::conflict().brief("Order already settled")
        }
        SettlementError::Sql(source) => {
            error!("failed to settle order: {source}");

            StatusError::internal_server_error()
        }
    }
}
