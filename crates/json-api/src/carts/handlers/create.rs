//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use halfdrinks_app::domain::{
    carts::models::{CartSessionUuid, LineItemTarget, NewCartItem},
    custom_drinks::{CustomDrinkUuid, builder::DEFAULT_DRINK_NAME},
    products::records::ProductUuid,
};

use crate::{
    carts::{errors::into_status_error, handlers::CartResponse, session},
    extensions::*,
    state::State,
};

const fn one() -> u32 {
    1
}

/// Custom drink descriptor, as produced by the drink builder.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomDrinkRequest {
    /// Identifier chosen by the builder; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub name: Option<String>,

    /// `baseFlavor`, `secondaryFlavor`, `size`, `addOns`
    #[salvo(schema(value_type = Object))]
    pub options: Map<String, Value>,
}

/// Add Cart Item Request
///
/// Exactly one of `productUuid` and `customDrink` must be given.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    #[serde(default)]
    pub product_uuid: Option<Uuid>,

    #[serde(default)]
    pub custom_drink: Option<CustomDrinkRequest>,

    #[serde(default = "one")]
    pub quantity: u32,

    /// Options for a product line
    #[serde(default)]
    #[salvo(schema(value_type = Object))]
    pub options: Map<String, Value>,
}

impl TryFrom<AddCartItemRequest> for NewCartItem {
    type Error = StatusError;

    fn try_from(request: AddCartItemRequest) -> Result<Self, Self::Error> {
        // Prices and product names are filled in by the cart service.
        match (request.product_uuid, request.custom_drink) {
            (Some(product), None) => Ok(NewCartItem {
                target: LineItemTarget::Product(ProductUuid::from_uuid(product)),
                name: String::new(),
                quantity: request.quantity,
                unit_price: 0,
                options: request.options,
            }),
            (None, Some(drink)) => Ok(NewCartItem {
                target: LineItemTarget::CustomDrink(
                    drink
                        .uuid
                        .map_or_else(CustomDrinkUuid::new, CustomDrinkUuid::from_uuid),
                ),
                name: drink
                    .name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DRINK_NAME.to_string()),
                quantity: request.quantity,
                unit_price: 0,
                options: drink.options,
            }),
            (None, None) | (Some(_), Some(_)) => Err(StatusError::bad_request()
                .brief("Invalid cart item")
                .detail("Either productUuid or customDrink is required, but not both")),
        }
    }
}

/// Add Cart Item Handler
///
/// Adds a line, merging it with an identical one. Starts a new cart session
/// when the request has none; the session is returned in `x-cart-session`.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid item or insufficient inventory"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "carts.add_item", skip_all, fields(cart_session = tracing::field::Empty), err)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = session::from_request(req)?.unwrap_or_else(CartSessionUuid::new);
    let item = NewCartItem::try_from(json.into_inner())?;

    tracing::Span::current().record("cart_session", tracing::field::display(session));

    let cart = state
        .app
        .carts
        .add_item(session, item)
        .await
        .map_err(into_status_error)?;

    session::set_header(res, session)?;

    Ok(Json(cart.try_into()?))
}
