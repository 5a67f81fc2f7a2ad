//! Loyalty Points
//!
//! Customers earn one point per whole dollar of each paid order.

pub(crate) mod repository;

use crate::uuids::TypedUuid;

/// Loyalty ledger entry UUID
pub type LoyaltyPointUuid = TypedUuid<LoyaltyPoint>;

/// Marker for ledger entries.
#[derive(Debug)]
pub struct LoyaltyPoint;

/// Ledger reason recorded for points earned from an order.
pub const ORDER_PURCHASE_REASON: &str = "order_purchase";
