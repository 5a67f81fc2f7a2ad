//! Checkout
//!
//! Turns submitted cart lines into a pending order and a payment intent.

pub mod data;
pub mod errors;
pub mod service;
pub mod validation;

pub use data::{CheckoutLine, CheckoutRequest, CheckoutResponse};
pub use errors::CheckoutError;
pub use service::*;
pub use validation::FieldError;
