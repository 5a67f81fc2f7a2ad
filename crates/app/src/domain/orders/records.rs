//! Order Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    auth::models::CustomerUuid,
    domain::{
        carts::models::{LineItemTarget, OptionBag},
        orders::status::{OrderStatus, PaymentStatus},
        pricing::OrderTotals,
        promotions::records::PromotionUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Postal address, stored on the order as a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Address {
    /// Names of required fields that are blank.
    #[must_use]
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address1", &self.address1),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub customer_uuid: Option<CustomerUuid>,
    pub email: String,
    pub status: OrderStatus,
    pub totals: OrderTotals,
    pub shipping_address: Address,
    pub billing_address: Option<Address>,
    pub promotion_uuid: Option<PromotionUuid>,
    pub promotion_code: Option<String>,
    pub payment_intent_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.status.payment_status()
    }

    /// Whole dollars of the order total, rounded down.
    #[must_use]
    pub const fn loyalty_points(&self) -> u64 {
        self.totals.total / 100
    }
}

/// Order line, priced at checkout time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub target: LineItemTarget,
    pub name: String,
    pub quantity: u32,
    pub price: u64,
    pub total: u64,
    pub options: OptionBag,
}

/// Order to insert, with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub customer_uuid: Option<CustomerUuid>,
    pub email: String,
    pub totals: OrderTotals,
    pub shipping_address: Address,
    pub billing_address: Option<Address>,
    pub promotion_uuid: Option<PromotionUuid>,
    pub promotion_code: Option<String>,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub target: LineItemTarget,
    pub name: String,
    pub quantity: u32,
    pub price: u64,
    pub total: u64,
    pub options: OptionBag,
}
