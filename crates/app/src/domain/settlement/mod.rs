//! Settlement
//!
//! Applies payment processor outcomes to orders: status transition,
//! inventory, promotion usage, loyalty points and the confirmation email.

pub mod errors;
pub mod service;

pub use errors::SettlementError;
pub use service::*;
