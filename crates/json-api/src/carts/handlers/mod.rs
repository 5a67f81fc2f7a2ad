//! Cart Handlers

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use halfdrinks_app::domain::carts::models::{Cart, CartItem, LineItemTarget};

use crate::extensions::*;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;

/// Cart Response
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The lines in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of line totals in cents
    pub subtotal: u64,

    /// Total units across all lines
    pub item_count: u64,
}

impl TryFrom<Cart> for CartResponse {
    type Error = StatusError;

    fn try_from(cart: Cart) -> Result<Self, Self::Error> {
        let subtotal = cart.subtotal().or_500("cart subtotal overflowed")?;
        let item_count = cart.item_count();

        let items = cart
            .items
            .into_iter()
            .map(CartItemResponse::try_from)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            items,
            subtotal,
            item_count,
        })
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,

    /// Set for catalog products
    pub product_uuid: Option<Uuid>,

    /// Set for custom drinks
    pub custom_drink_uuid: Option<Uuid>,

    pub name: String,
    pub quantity: u32,

    /// Unit price in cents
    pub unit_price: u64,

    /// Line total in cents
    pub total: u64,

    #[salvo(schema(value_type = Object))]
    pub options: Map<String, Value>,
}

impl TryFrom<CartItem> for CartItemResponse {
    type Error = StatusError;

    fn try_from(item: CartItem) -> Result<Self, Self::Error> {
        let total = item.total().or_500("cart line total overflowed")?;

        let (product_uuid, custom_drink_uuid) = match item.target {
            LineItemTarget::Product(uuid) => (Some(uuid.into_uuid()), None),
            LineItemTarget::CustomDrink(uuid) => (None, Some(uuid.into_uuid())),
        };

        Ok(Self {
            uuid: item.uuid.into_uuid(),
            product_uuid,
            custom_drink_uuid,
            name: item.name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total,
            options: item.options,
        })
    }
}

#[cfg(test)]
pub(super) mod tests {
    use serde_json::json;

    use halfdrinks_app::domain::{
        carts::models::{CartItemUuid, OptionBag},
        custom_drinks::CustomDrinkUuid,
        products::records::ProductUuid,
    };

    use super::*;

    pub(crate) fn make_cart(product: ProductUuid, quantity: u32, unit_price: u64) -> Cart {
        Cart {
            items: vec![CartItem {
                uuid: CartItemUuid::new(),
                target: LineItemTarget::Product(product),
                name: "Berry Blast".to_string(),
                quantity,
                unit_price,
                options: OptionBag::new(),
            }],
        }
    }

    #[test]
    fn cart_response_totals_lines() -> testresult::TestResult {
        let product = ProductUuid::new();
        let mut cart = make_cart(product, 2, 1000);

        cart.items.push(CartItem {
            uuid: CartItemUuid::new(),
            target: LineItemTarget::CustomDrink(CustomDrinkUuid::new()),
            name: "Sunrise".to_string(),
            quantity: 1,
            unit_price: 749,
            options: json!({ "baseFlavor": "mango", "size": "medium", "addOns": ["chia-seeds"] })
                .as_object()
                .cloned()
                .unwrap_or_default(),
        });

        let response = CartResponse::try_from(cart)?;

        assert_eq!(response.subtotal, 2749);
        assert_eq!(response.item_count, 3);
        assert_eq!(response.items[0].product_uuid, Some(product.into_uuid()));
        assert_eq!(response.items[0].total, 2000);
        assert_eq!(response.items[1].product_uuid, None);
        assert!(response.items[1].custom_drink_uuid.is_some(), "custom drink uuid set");

        Ok(())
    }
}
