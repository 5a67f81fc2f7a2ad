//! Carts
//!
//! Carts are keyed by a session uuid the client echoes back in the
//! `x-cart-session` header.

mod errors;
mod handlers;
pub(crate) mod items;
pub(crate) mod session;

pub(crate) use handlers::*;
