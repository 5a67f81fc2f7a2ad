//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use halfdrinks_app::{
    auth::{CustomerUuid, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService, checkout::MockCheckoutService,
        newsletter::MockNewsletterService, products::MockProductsService,
        settlement::MockSettlementService,
    },
    payments::WebhookVerifier,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid = CustomerUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Builds an [`AppContext`] from mocks. Services left unset get a mock with
/// no expectations, so any call to them fails the test.
#[derive(Default)]
pub(crate) struct AppContextBuilder {
    products: MockProductsService,
    carts: MockCartsService,
    checkout: MockCheckoutService,
    settlement: MockSettlementService,
    newsletter: MockNewsletterService,
    auth: MockAuthService,
    webhooks: Option<WebhookVerifier>,
}

impl AppContextBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn products(self, products: MockProductsService) -> Self {
        Self { products, ..self }
    }

    pub(crate) fn carts(self, carts: MockCartsService) -> Self {
        Self { carts, ..self }
    }

    pub(crate) fn checkout(self, checkout: MockCheckoutService) -> Self {
        Self { checkout, ..self }
    }

    pub(crate) fn settlement(self, settlement: MockSettlementService) -> Self {
        Self { settlement, ..self }
    }

    pub(crate) fn newsletter(self, newsletter: MockNewsletterService) -> Self {
        Self { newsletter, ..self }
    }

    pub(crate) fn auth(self, auth: MockAuthService) -> Self {
        Self { auth, ..self }
    }

    pub(crate) fn with_webhook_secret(self) -> Self {
        Self {
            webhooks: Some(WebhookVerifier::new(TEST_WEBHOOK_SECRET)),
            ..self
        }
    }

    pub(crate) fn build(self) -> AppContext {
        AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            settlement: Arc::new(self.settlement),
            newsletter: Arc::new(self.newsletter),
            auth: Arc::new(self.auth),
            webhooks: self.webhooks,
        }
    }
}

pub(crate) fn state_with(builder: AppContextBuilder) -> Arc<State> {
    State::from_app_context(builder.build())
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_customer_uuid(TEST_CUSTOMER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Serve `route` anonymously.
pub(crate) fn service(builder: AppContextBuilder, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(builder)))
            .push(route),
    )
}

/// Serve `route` as [`TEST_CUSTOMER_UUID`].
pub(crate) fn customer_service(builder: AppContextBuilder, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(builder)))
            .hoop(inject_customer)
            .push(route),
    )
}
