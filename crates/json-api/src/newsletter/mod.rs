//! Newsletter

mod handlers;

pub(crate) use handlers::*;
