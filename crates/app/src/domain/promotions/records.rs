//! Promotions Records

use jiff::Timestamp;

use crate::{
    domain::{pricing::PricingError, promotions::data::DiscountKind},
    uuids::TypedUuid,
};

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Promotion Record
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount: DiscountKind,
    pub min_amount: Option<u64>,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u64>,
    pub usage_count: u64,
    pub is_active: bool,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromotionRecord {
    /// Whether the promotion can be redeemed at `now`, ignoring the subtotal.
    #[must_use]
    pub fn is_redeemable_at(&self, now: Timestamp) -> bool {
        let within_window = self.starts_at <= now && now <= self.ends_at;
        let under_limit = self
            .usage_limit
            .is_none_or(|limit| self.usage_count < limit);

        self.is_active && within_window && under_limit
    }

    /// Discount this promotion grants on `subtotal` at `now`.
    ///
    /// Zero when the promotion is not redeemable or the subtotal is below
    /// the minimum spend. Otherwise the raw discount capped by
    /// `max_discount` and by the subtotal itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the percentage calculation overflows.
    pub fn discount_for(&self, subtotal: u64, now: Timestamp) -> Result<u64, PricingError> {
        if !self.is_redeemable_at(now) {
            return Ok(0);
        }

        if self.min_amount.is_some_and(|min| subtotal < min) {
            return Ok(0);
        }

        let raw = self.discount.raw_discount(subtotal)?;
        let capped = self.max_discount.map_or(raw, |max| raw.min(max));

        Ok(capped.min(subtotal))
    }
}
