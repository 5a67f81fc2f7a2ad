//! Logout Handler

use salvo::prelude::*;

use crate::auth::handlers::AccountResponse;

/// Logout Handler
///
/// Tokens are bearer credentials held by the client, so there is no server
/// session to end.
#[endpoint(tags("auth"), summary = "Log Out")]
pub(crate) async fn handler() -> Json<AccountResponse> {
    Json(AccountResponse {
        success: true,
        message: None,
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{AppContextBuilder, service};

    use super::*;

    #[tokio::test]
    async fn logout_always_succeeds() -> TestResult {
        let body: AccountResponse = TestClient::post("http://example.com/api/auth/logout")
            .send(&service(
                AppContextBuilder::new(),
                Router::with_path("api/auth/logout").post(handler),
            ))
            .await
            .take_json()
            .await?;

        assert!(body.success, "logout should succeed");
        assert_eq!(body.message, None);

        Ok(())
    }
}
