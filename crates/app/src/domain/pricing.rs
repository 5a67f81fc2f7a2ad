//! Order Pricing
//!
//! All amounts are minor units (cents). Percentages are applied through
//! [`Decimal`] and rounded half away from zero to the nearest cent.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::Serialize;
use thiserror::Error;

/// Sales tax applied to the subtotal, in whole percent.
pub const TAX_RATE_PERCENT: u16 = 8;

/// Flat shipping charge for orders at or below the free shipping threshold.
pub const FLAT_SHIPPING: u64 = 999;

/// Subtotals strictly above this amount ship for free.
pub const FREE_SHIPPING_THRESHOLD: u64 = 5_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("percentage calculation overflowed")]
    PercentConversion,

    #[error("amount arithmetic overflowed")]
    Overflow,
}

/// Computed monetary breakdown for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub discount: u64,
    pub total: u64,
}

impl OrderTotals {
    /// Build the totals for a subtotal and an already-resolved discount.
    ///
    /// The discount is clamped to the subtotal so the total never drops
    /// below tax plus shipping.
    ///
    /// # Errors
    ///
    /// Returns an error if any intermediate amount overflows.
    pub fn calculate(subtotal: u64, discount: u64) -> Result<Self, PricingError> {
        let tax = tax_for(subtotal)?;
        let shipping = shipping_for(subtotal);
        let discount = discount.min(subtotal);

        let total = subtotal
            .checked_add(tax)
            .and_then(|sum| sum.checked_add(shipping))
            .and_then(|sum| sum.checked_sub(discount))
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            shipping,
            discount,
            total,
        })
    }
}

/// Sales tax owed on a subtotal.
///
/// # Errors
///
/// Returns an error if the percentage cannot be represented.
pub fn tax_for(subtotal: u64) -> Result<u64, PricingError> {
    percent_of(subtotal, TAX_RATE_PERCENT)
}

/// Shipping charge for a subtotal.
pub fn shipping_for(subtotal: u64) -> u64 {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        0
    } else {
        FLAT_SHIPPING
    }
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the product does not fit.
pub fn line_total(unit_price: u64, quantity: u32) -> Result<u64, PricingError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// `percent`% of `amount`, rounded half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] when the result does not fit
/// in a `u64`.
pub fn percent_of(amount: u64, percent: u16) -> Result<u64, PricingError> {
    let applied = Decimal::from(amount)
        .checked_mul(Decimal::from(percent))
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::PercentConversion)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::PercentConversion)
}
