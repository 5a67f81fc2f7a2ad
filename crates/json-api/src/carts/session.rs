//! Cart session header.

use salvo::{http::HeaderValue, prelude::*};
use uuid::Uuid;

use halfdrinks_app::domain::carts::models::CartSessionUuid;

use crate::extensions::*;

pub(crate) const CART_SESSION_HEADER: &str = "x-cart-session";

/// The session named by the request, if any. A header that is present but
/// not a uuid is a client error.
pub(crate) fn from_request(req: &Request) -> Result<Option<CartSessionUuid>, StatusError> {
    let Some(value) = req.headers().get(CART_SESSION_HEADER) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .or_400("invalid cart session header")?
        .trim();

    if value.is_empty() {
        return Ok(None);
    }

    Uuid::parse_str(value)
        .map(|uuid| Some(CartSessionUuid::from_uuid(uuid)))
        .or_400("invalid cart session header")
}

/// Echo the session back so clients can pick up a newly created one.
pub(crate) fn set_header(res: &mut Response, session: CartSessionUuid) -> Result<(), StatusError> {
    let value = HeaderValue::from_str(&session.to_string()).or_500("invalid cart session")?;

    res.headers_mut().insert(CART_SESSION_HEADER, value);

    Ok(())
}
