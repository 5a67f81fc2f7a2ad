//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use halfdrinks_app::domain::checkout::CheckoutError;

/// Metrics label for a failed checkout.
pub(crate) fn outcome(error: &CheckoutError) -> &'static str {
    match error {
        CheckoutError::Validation(_)
        | CheckoutError::ProductNotFound(_)
        | CheckoutError::InvalidCustomDrink(_) => "rejected",
        CheckoutError::ServiceUnavailable => "unavailable",
        CheckoutError::Payment(_) | CheckoutError::Pricing(_) | CheckoutError::Sql(_) => "failed",
    }
}

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::Validation(fields) => {
            let detail = fields
                .iter()
                .map(|field| format!("{}: {}", field.field, field.message))
                .collect::<Vec<_>>()
                .join("; ");

            StatusError::bad_request()
                .brief("Invalid checkout request")
                .detail(detail)
        }
        CheckoutError::ProductNotFound(product) => StatusError::not_found()
            .brief("Product not found")
            .detail(format!("Product {product} not found")),
        CheckoutError::InvalidCustomDrink(source) => StatusError::bad_request()
            .brief("Invalid custom drink")
            .detail(source.to_string()),
        CheckoutError::ServiceUnavailable => {
            StatusError::service_unavailable().brief("Payment processing is not configured")
        }
        error @ (CheckoutError::Payment(_) | CheckoutError::Pricing(_) | CheckoutError::Sql(_)) => {
            error!("checkout failed: {error}");

            StatusError::internal_server_error().brief("Failed to process checkout")
        }
    }
}
