//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::{
    custom_drinks::CustomDrinkError, pricing::PricingError, products::ProductsServiceError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("only {available} left in stock")]
    InsufficientInventory { available: u64 },

    #[error("invalid cart item: {0}")]
    InvalidItem(String),

    #[error("invalid custom drink")]
    CustomDrink(#[from] CustomDrinkError),

    #[error("cart total overflowed")]
    Pricing(#[from] PricingError),

    #[error("catalog lookup failed")]
    Products(#[source] ProductsServiceError),

    #[error("storage error")]
    Sql(#[from] Error),

    #[error("stored cart could not be decoded")]
    Serialization(#[from] serde_json::Error),
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Products(other),
        }
    }
}
