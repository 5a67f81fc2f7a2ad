//! Customer bearer token formatting, parsing and hashing.
//!
//! Tokens look like `hd_v1_<uuid simple>.<64 hex>`. Only the SHA-256 of the
//! whole token string is stored.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Customer token prefix.
pub const CUSTOMER_TOKEN_PREFIX: &str = "hd";

/// Number of secret bytes encoded in a token.
pub const CUSTOMER_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerTokenVersion {
    V1,
}

impl CustomerTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for CustomerTokenVersion {
    type Error = CustomerTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(CustomerTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for CustomerTokenVersion {
    type Err = CustomerTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(CustomerTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct CustomerTokenSecret {
    bytes: [u8; CUSTOMER_TOKEN_SECRET_BYTES],
}

impl CustomerTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; CUSTOMER_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; CUSTOMER_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CUSTOMER_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for CustomerTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomerTokenSecret(**redacted**)")
    }
}

impl Drop for CustomerTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedCustomerToken {
    pub token_uuid: Uuid,
    pub version: CustomerTokenVersion,
    pub secret: CustomerTokenSecret,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerTokenError {
    #[error("customer token format is invalid")]
    InvalidFormat,

    #[error("customer token uses an unsupported version")]
    UnsupportedVersion,

    #[error("customer token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn format_customer_token(
    token_uuid: Uuid,
    version: CustomerTokenVersion,
    secret: &CustomerTokenSecret,
) -> String {
    format!(
        "{CUSTOMER_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        hex::encode(secret.as_bytes())
    )
}

/// Split a presented token into its parts.
///
/// # Errors
///
/// Returns an error when the prefix, version, uuid or secret is malformed.
pub fn parse_customer_token(token: &str) -> Result<ParsedCustomerToken, CustomerTokenError> {
    let (prefix_and_id, secret_hex) = token
        .split_once('.')
        .ok_or(CustomerTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(CustomerTokenError::InvalidFormat)?;
    let version = id_parts.next().ok_or(CustomerTokenError::InvalidFormat)?;
    let token_uuid = id_parts.next().ok_or(CustomerTokenError::InvalidFormat)?;

    if prefix != CUSTOMER_TOKEN_PREFIX {
        return Err(CustomerTokenError::InvalidFormat);
    }

    let version = CustomerTokenVersion::from_str(version)?;

    let token_uuid =
        Uuid::try_parse(token_uuid).map_err(|_| CustomerTokenError::InvalidFormat)?;

    let mut secret = [0_u8; CUSTOMER_TOKEN_SECRET_BYTES];

    hex::decode_to_slice(secret_hex, &mut secret)
        .map_err(|_| CustomerTokenError::InvalidSecretEncoding)?;

    Ok(ParsedCustomerToken {
        token_uuid,
        version,
        secret: CustomerTokenSecret::from_bytes(secret),
    })
}

/// Hex SHA-256 of the full token string, as stored.
#[must_use]
pub fn hash_customer_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
