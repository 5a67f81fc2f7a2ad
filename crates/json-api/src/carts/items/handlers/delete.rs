//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use halfdrinks_app::domain::carts::models::CartItemUuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartResponse, session},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = session::from_request(req)?
        .ok_or_else(|| StatusError::not_found().brief("Cart item not found"))?;

    let cart = state
        .app
        .carts
        .remove_item(session, CartItemUuid::from_uuid(item.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.try_into()?))
}
