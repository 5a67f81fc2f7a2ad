//! App Router

use salvo::Router;

use crate::{auth, carts, checkout, healthcheck, newsletter, products, webhooks};

/// Routes served under `/api`.
pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::handler)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{slug}").get(products::get::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .post(carts::create::handler)
                .delete(carts::delete::handler)
                .push(
                    Router::with_path("items/{item}")
                        .put(carts::items::update::handler)
                        .delete(carts::items::delete::handler),
                ),
        )
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(Router::with_path("webhooks/payment").post(webhooks::payment::handler))
        .push(Router::with_path("newsletter").post(newsletter::subscribe::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("logout").post(auth::logout::handler))
                .push(Router::with_path("me").get(auth::me::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::Value;
    use testresult::TestResult;

    use crate::test_helpers::{AppContextBuilder, state_with};

    use super::*;

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with(AppContextBuilder::new())))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn healthcheck_is_served_under_api() -> TestResult {
        let body: Value = TestClient::get("http://example.com/api/healthcheck")
            .send(&make_service())
            .await
            .take_json()
            .await?;

        assert_eq!(body["status"], "ok");

        Ok(())
    }

    #[tokio::test]
    async fn auth_routes_are_mounted() {
        let service = make_service();

        let logout = TestClient::post("http://example.com/api/auth/logout")
            .send(&service)
            .await;

        let me = TestClient::get("http://example.com/api/auth/me")
            .send(&service)
            .await;

        assert_eq!(logout.status_code, Some(StatusCode::OK));
        assert_eq!(me.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn unknown_routes_return_404() {
        let res = TestClient::get("http://example.com/api/blog")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
