//! Customer identification
//!
//! Customers present opaque bearer tokens. Login and registration flows are
//! not offered; tokens are issued by operators.

mod errors;
pub mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
