//! Account Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod me;
pub(crate) mod register;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extensions::*;

/// Outcome of an account action.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Answer a credentials request that this storefront does not support yet.
///
/// The body must still be JSON so clients get a 400 for malformed input.
pub(super) async fn not_implemented(
    req: &mut Request,
    res: &mut Response,
    message: &str,
) -> Result<Json<AccountResponse>, StatusError> {
    req.parse_json::<Value>()
        .await
        .or_400("request body must be valid JSON")?;

    res.status_code(StatusCode::NOT_IMPLEMENTED);

    Ok(Json(AccountResponse {
        success: false,
        message: Some(message.to_string()),
    }))
}
