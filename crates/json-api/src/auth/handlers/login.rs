//! Login Handler

use salvo::prelude::*;

use crate::auth::handlers::{AccountResponse, not_implemented};

/// Login Handler
///
/// Password login is not offered; customers use operator-issued tokens.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::NOT_IMPLEMENTED, description = "Login is not available"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed JSON body"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    res: &mut Response,
) -> Result<Json<AccountResponse>, StatusError> {
    not_implemented(req, res, "Login functionality not implemented yet").await
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{AppContextBuilder, service};

    use super::*;

    fn make_service() -> Service {
        service(
            AppContextBuilder::new(),
            Router::with_path("api/auth/login").post(handler),
        )
    }

    #[tokio::test]
    async fn login_is_not_implemented() -> TestResult {
        let mut res = TestClient::post("http://example.com/api/auth/login")
            .json(&json!({ "email": "fan@example.com", "password": "hunter2" }))
            .send(&make_service())
            .await;

        let body: AccountResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_IMPLEMENTED));
        assert!(!body.success, "login should not succeed");
        assert_eq!(
            body.message.as_deref(),
            Some("Login functionality not implemented yet")
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_returns_400() {
        let res = TestClient::post("http://example.com/api/auth/login")
            .add_header("content-type", "application/json", true)
            .body("{not json")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
