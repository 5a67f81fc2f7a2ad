//! Newsletter

pub mod email;
pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use email::{is_valid_email, normalise_email};
pub use errors::NewsletterError;
pub use service::*;
