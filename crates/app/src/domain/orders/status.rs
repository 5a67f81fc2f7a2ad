//! Order status state machine.
//!
//! An order starts `Pending` and is settled exactly once by a payment
//! event. Payment status is derived from the order status, so the two can
//! never disagree.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// Outcome reported by the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentEvent {
    Succeeded,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("order is already {0}")]
    AlreadySettled(OrderStatus),
}

#[derive(Debug, Error)]
#[error("unknown order status {0:?}")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    /// Apply a payment event. Only `Pending` orders move; terminal states
    /// reject every event.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::AlreadySettled`] for a confirmed or
    /// cancelled order.
    pub const fn transition(self, event: PaymentEvent) -> Result<Self, TransitionError> {
        match (self, event) {
            (Self::Pending, PaymentEvent::Succeeded) => Ok(Self::Confirmed),
            (Self::Pending, PaymentEvent::Failed) => Ok(Self::Cancelled),
            (Self::Confirmed | Self::Cancelled, _) => Err(TransitionError::AlreadySettled(self)),
        }
    }

    #[must_use]
    pub const fn payment_status(self) -> PaymentStatus {
        match self {
            Self::Pending => PaymentStatus::Pending,
            Self::Confirmed => PaymentStatus::Paid,
            Self::Cancelled => PaymentStatus::Failed,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
