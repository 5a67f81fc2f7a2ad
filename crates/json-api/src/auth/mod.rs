//! Customer identification and account endpoints

pub(crate) mod handlers;
pub(crate) mod middleware;

pub(crate) use handlers::*;
