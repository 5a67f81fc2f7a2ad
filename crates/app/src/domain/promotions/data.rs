//! Promotions Data

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::domain::{
    pricing::{PricingError, percent_of},
    promotions::records::PromotionUuid,
};

/// How a promotion reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Whole-percent reduction of the subtotal.
    PercentageOff { percentage: u16 },

    /// Fixed reduction in minor units.
    AmountOff { amount: u64 },
}

impl DiscountKind {
    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::PercentageOff { .. } => "percentage_off",
            Self::AmountOff { .. } => "amount_off",
        }
    }

    /// Stored `discount_value` column for this kind.
    #[must_use]
    pub const fn value(&self) -> u64 {
        match self {
            Self::PercentageOff { percentage } => *percentage as u64,
            Self::AmountOff { amount } => *amount,
        }
    }

    /// Raw reduction for a subtotal before caps are applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the percentage calculation overflows.
    pub fn raw_discount(&self, subtotal: u64) -> Result<u64, PricingError> {
        match self {
            Self::PercentageOff { percentage } => percent_of(subtotal, *percentage),
            Self::AmountOff { amount } => Ok(*amount),
        }
    }
}

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount: DiscountKind,
    pub min_amount: Option<u64>,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u64>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percentage_raw_discount_rounds_to_cents() -> TestResult {
        let kind = DiscountKind::PercentageOff { percentage: 15 };

        assert_eq!(kind.raw_discount(999)?, 150, "15% of 9.99 is 1.4985");

        Ok(())
    }

    #[test]
    fn stored_value_matches_kind() {
        assert_eq!(DiscountKind::PercentageOff { percentage: 20 }.value(), 20);
        assert_eq!(DiscountKind::AmountOff { amount: 1_000 }.value(), 1_000);
        assert_eq!(
            DiscountKind::AmountOff { amount: 1 }.to_str(),
            "amount_off"
        );
    }
}
