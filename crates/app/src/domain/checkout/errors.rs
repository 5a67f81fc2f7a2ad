//! Checkout errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    domain::{
        checkout::validation::FieldErrors, custom_drinks::CustomDrinkError, pricing::PricingError,
        products::records::ProductUuid,
    },
    payments::PaymentError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("invalid checkout request")]
    Validation(FieldErrors),

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("custom drink options are invalid")]
    InvalidCustomDrink(#[from] CustomDrinkError),

    #[error("payment processing is not configured")]
    ServiceUnavailable,

    #[error("payment processor error")]
    Payment(#[from] PaymentError),

    #[error("pricing error")]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[from] Error),
}
