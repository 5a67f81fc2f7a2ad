//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, handlers::CartResponse, session},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the cart for the `x-cart-session` header, or an empty cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "The cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed cart session"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(session) = session::from_request(req)? else {
        return Ok(Json(CartResponse::default()));
    };

    let cart = state
        .app
        .carts
        .get_cart(session)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.try_into()?))
}
