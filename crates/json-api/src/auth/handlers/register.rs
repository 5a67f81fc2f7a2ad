//! Register Handler

use salvo::prelude::*;

use crate::auth::handlers::{AccountResponse, not_implemented};

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::NOT_IMPLEMENTED, description = "Registration is not available"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed JSON body"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    res: &mut Response,
) -> Result<Json<AccountResponse>, StatusError> {
    not_implemented(req, res, "Registration functionality not implemented yet").await
}
