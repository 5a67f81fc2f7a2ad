//! Settlement errors.

use thiserror::Error;

use crate::domain::orders::OrderStatus;

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("order not found")]
    OrderNotFound,

    #[error("payment intent does not belong to order")]
    IntentMismatch,

    #[error("order is already {0}")]
    AlreadySettled(OrderStatus),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
