//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use halfdrinks_app::domain::checkout::CheckoutResponse;

use crate::{
    carts::session,
    checkout::{
        errors::{into_status_error, outcome},
        requests::CheckoutRequestBody,
    },
    extensions::*,
    observability::record_checkout,
    state::State,
};

/// Checkout Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutCreatedResponse {
    pub order_uuid: Uuid,

    /// Human-readable order number, e.g. `ORD-1718000000000-A1B2C3D4E`
    pub order_number: String,

    /// Secret the client uses to confirm the payment intent
    pub client_secret: String,

    /// Amount to be charged, in cents
    pub total: u64,
}

impl From<CheckoutResponse> for CheckoutCreatedResponse {
    fn from(response: CheckoutResponse) -> Self {
        Self {
            order_uuid: response.order_uuid.into_uuid(),
            order_number: response.order_number,
            client_secret: response.client_secret,
            total: response.total,
        }
    }
}

/// Checkout Handler
///
/// Creates a pending order and a payment intent for the submitted lines.
/// Orders are attached to the customer when a valid bearer token is sent.
/// The cart named by `x-cart-session` is emptied once the order exists.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid checkout request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Payments not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequestBody>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CheckoutCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart_session = session::from_request(req)?;
    let request = json.into_inner().into_request(depot.customer_uuid());

    let response = match state.app.checkout.checkout(request).await {
        Ok(response) => response,
        Err(error) => {
            record_checkout(outcome(&error));

            return Err(into_status_error(error));
        }
    };

    record_checkout("created");

    info!(
        order_uuid = %response.order_uuid,
        order_number = %response.order_number,
        total = response.total,
        "checkout created order"
    );

    // The order is already placed, so a cart that fails to clear is only logged.
    if let Some(cart_session) = cart_session
        && let Err(error) = state.app.carts.clear(cart_session).await
    {
        warn!(%error, %cart_session, "failed to clear cart after checkout");
    }

    Ok(Json(response.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use halfdrinks_app::domain::{
        carts::{CartsServiceError, MockCartsService, models::CartSessionUuid},
        checkout::{CheckoutError, FieldError, MockCheckoutService},
        orders::OrderUuid,
        products::records::ProductUuid,
    };

    use crate::{
        carts::session::CART_SESSION_HEADER,
        test_helpers::{AppContextBuilder, TEST_CUSTOMER_UUID, customer_service, service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("api/checkout").post(handler)
    }

    fn body(product: ProductUuid) -> Value {
        json!({
            "items": [{ "productUuid": product, "quantity": 2, "price": 1000 }],
            "shippingAddress": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "address1": "1 Analytical Way",
                "city": "Austin",
                "state": "TX",
                "zipCode": "78701",
                "country": "US"
            },
            "email": "ada@example.com",
            "promotionCode": " SUMMER20 "
        })
    }

    fn created(order_uuid: OrderUuid) -> CheckoutResponse {
        CheckoutResponse {
            order_uuid,
            order_number: "ORD-1718000000000-A1B2C3D4E".to_string(),
            client_secret: "pi_123_secret_456".to_string(),
            total: 3159,
        }
    }

    #[tokio::test]
    async fn test_checkout_returns_order_and_client_secret() -> TestResult {
        let product = ProductUuid::new();
        let order_uuid = OrderUuid::new();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .withf(move |request| {
                request.items.len() == 1
                    && request.items[0].product_uuid == Some(product)
                    && request.items[0].quantity == 2
                    && request.items[0].client_price == Some(1000)
                    && request.billing_address.is_none()
                    && request.promotion_code.as_deref() == Some("SUMMER20")
                    && request.customer_uuid.is_none()
            })
            .return_once(move |_| Ok(created(order_uuid)));

        let mut res = TestClient::post("http://example.com/api/checkout")
            .json(&body(product))
            .send(&service(AppContextBuilder::new().checkout(checkout), route()))
            .await;

        let response: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(response["orderUuid"], order_uuid.to_string());
        assert_eq!(response["orderNumber"], "ORD-1718000000000-A1B2C3D4E");
        assert_eq!(response["clientSecret"], "pi_123_secret_456");
        assert_eq!(response["total"], 3159);

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_session() {
        let session = CartSessionUuid::new();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_| Ok(created(OrderUuid::new())));

        let mut carts = MockCartsService::new();

        carts
            .expect_clear()
            .times(1)
            .withf(move |s| *s == session)
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/api/checkout")
            .add_header(CART_SESSION_HEADER, session.to_string(), true)
            .json(&body(ProductUuid::new()))
            .send(&service(
                AppContextBuilder::new().checkout(checkout).carts(carts),
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_checkout_succeeds_when_cart_clear_fails() {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_| Ok(created(OrderUuid::new())));

        let mut carts = MockCartsService::new();

        carts
            .expect_clear()
            .once()
            .return_once(|_| Err(CartsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::post("http://example.com/api/checkout")
            .add_header(CART_SESSION_HEADER, CartSessionUuid::new().to_string(), true)
            .json(&body(ProductUuid::new()))
            .send(&service(
                AppContextBuilder::new().checkout(checkout).carts(carts),
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart() {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_| Err(CheckoutError::ServiceUnavailable));

        let mut carts = MockCartsService::new();

        carts.expect_clear().never();

        let res = TestClient::post("http://example.com/api/checkout")
            .add_header(CART_SESSION_HEADER, CartSessionUuid::new().to_string(), true)
            .json(&body(ProductUuid::new()))
            .send(&service(
                AppContextBuilder::new().checkout(checkout).carts(carts),
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_checkout_attaches_identified_customer() {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .withf(|request| request.customer_uuid == Some(TEST_CUSTOMER_UUID))
            .return_once(|_| Ok(created(OrderUuid::new())));

        let res = TestClient::post("http://example.com/api/checkout")
            .json(&body(ProductUuid::new()))
            .send(&customer_service(AppContextBuilder::new().checkout(checkout), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_checkout_validation_error_returns_400() {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout().once().return_once(|_| {
            Err(CheckoutError::Validation(
                vec![FieldError {
                    field: "items[0]".to_string(),
                    message: "must reference a product or a custom drink",
                }]
                .into(),
            ))
        });

        let res = TestClient::post("http://example.com/api/checkout")
            .json(&body(ProductUuid::new()))
            .send(&service(AppContextBuilder::new().checkout(checkout), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_checkout_unknown_product_returns_404() {
        let product = ProductUuid::new();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(move |_| Err(CheckoutError::ProductNotFound(product)));

        let res = TestClient::post("http://example.com/api/checkout")
            .json(&body(product))
            .send(&service(AppContextBuilder::new().checkout(checkout), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_checkout_without_processor_returns_503() {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_checkout()
            .once()
            .return_once(|_| Err(CheckoutError::ServiceUnavailable));

        let res = TestClient::post("http://example.com/api/checkout")
            .json(&body(ProductUuid::new()))
            .send(&service(AppContextBuilder::new().checkout(checkout), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_checkout_malformed_body_returns_400() {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_checkout().never();

        let res = TestClient::post("http://example.com/api/checkout")
            .json(&json!({ "items": "lots" }))
            .send(&service(AppContextBuilder::new().checkout(checkout), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
