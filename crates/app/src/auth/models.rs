//! Customer and token models.

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::{auth::token::CustomerTokenVersion, uuids::TypedUuid};

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub uuid: CustomerUuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A customer with their loyalty balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub loyalty_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Active token row matched during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveCustomerToken {
    pub uuid: Uuid,
    pub customer_uuid: CustomerUuid,
    pub version: CustomerTokenVersion,
}

/// Token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct CustomerTokenMetadata {
    pub uuid: Uuid,
    pub customer_uuid: CustomerUuid,
    pub version: CustomerTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewCustomerToken {
    pub uuid: Uuid,
    pub customer_uuid: CustomerUuid,
    pub version: CustomerTokenVersion,
    pub token_hash: String,
}

/// Issued token with the one-time raw value.
#[derive(Debug, Clone)]
pub struct IssuedCustomerToken {
    pub token: String,
    pub metadata: CustomerTokenMetadata,
}
