//! Carts

pub mod errors;
pub mod models;
pub mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use repositories::{CartRepository, InMemoryCartRepository, PgCartRepository};
pub use service::*;
