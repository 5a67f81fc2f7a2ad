//! Checkout Data

use crate::{
    auth::models::CustomerUuid,
    domain::{
        carts::models::OptionBag,
        custom_drinks::CustomDrinkUuid,
        orders::{Address, OrderUuid},
        products::records::ProductUuid,
    },
};

/// A line as submitted by the client.
///
/// Exactly one of `product_uuid` and `custom_drink_uuid` must be set. The
/// client price is informational; lines are re-priced server-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutLine {
    pub product_uuid: Option<ProductUuid>,
    pub custom_drink_uuid: Option<CustomDrinkUuid>,
    pub name: Option<String>,
    pub quantity: i64,
    pub client_price: Option<u64>,
    pub options: OptionBag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutLine>,
    pub shipping_address: Address,
    pub billing_address: Option<Address>,
    pub email: String,
    pub promotion_code: Option<String>,
    pub customer_uuid: Option<CustomerUuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub order_uuid: OrderUuid,
    pub order_number: String,
    pub client_secret: String,

    /// Order total in cents.
    pub total: u64,
}
