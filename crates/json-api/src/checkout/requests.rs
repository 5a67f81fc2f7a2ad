//! Checkout request bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use halfdrinks_app::{
    auth::CustomerUuid,
    domain::{
        checkout::{CheckoutLine, CheckoutRequest},
        custom_drinks::CustomDrinkUuid,
        orders::Address,
        products::records::ProductUuid,
    },
};

/// Postal address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: Option<String>,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<AddressRequest> for Address {
    fn from(address: AddressRequest) -> Self {
        Self {
            first_name: address.first_name,
            last_name: address.last_name,
            company: address.company,
            address1: address.address1,
            address2: address.address2,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
            phone: address.phone,
        }
    }
}

/// Checkout line
///
/// References either a catalog product or a custom drink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutItemRequest {
    #[serde(default)]
    pub product_uuid: Option<Uuid>,

    #[serde(default)]
    pub custom_drink_uuid: Option<Uuid>,

    #[serde(default)]
    pub name: Option<String>,

    pub quantity: i64,

    /// Unit price the client displayed, in cents. Only compared against the
    /// server price.
    #[serde(default)]
    pub price: Option<u64>,

    #[serde(default)]
    #[salvo(schema(value_type = Object))]
    pub options: Map<String, Value>,
}

impl From<CheckoutItemRequest> for CheckoutLine {
    fn from(item: CheckoutItemRequest) -> Self {
        Self {
            product_uuid: item.product_uuid.map(ProductUuid::from_uuid),
            custom_drink_uuid: item.custom_drink_uuid.map(CustomDrinkUuid::from_uuid),
            name: item.name,
            quantity: item.quantity,
            client_price: item.price,
            options: item.options,
        }
    }
}

/// Checkout Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutRequestBody {
    pub items: Vec<CheckoutItemRequest>,
    pub shipping_address: AddressRequest,

    /// Defaults to the shipping address
    #[serde(default)]
    pub billing_address: Option<AddressRequest>,

    pub email: String,

    #[serde(default)]
    pub promotion_code: Option<String>,
}

impl CheckoutRequestBody {
    pub(crate) fn into_request(self, customer_uuid: Option<CustomerUuid>) -> CheckoutRequest {
        CheckoutRequest {
            items: self.items.into_iter().map(Into::into).collect(),
            shipping_address: self.shipping_address.into(),
            billing_address: self.billing_address.map(Into::into),
            email: self.email,
            promotion_code: self
                .promotion_code
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty()),
            customer_uuid,
        }
    }
}
