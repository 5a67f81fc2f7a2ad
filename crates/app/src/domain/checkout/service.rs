//! Checkout Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::models::LineItemTarget,
        checkout::{
            data::{CheckoutLine, CheckoutRequest, CheckoutResponse},
            errors::CheckoutError,
            validation::validate,
        },
        custom_drinks::{CustomDrink, builder::DEFAULT_DRINK_NAME},
        newsletter::normalise_email,
        orders::{
            generate_order_number,
            records::{NewOrder, NewOrderItem, OrderItemUuid, OrderUuid},
            repository::PgOrdersRepository,
        },
        pricing::{OrderTotals, PricingError, line_total},
        products::repository::PgProductsRepository,
        promotions::repository::PgPromotionsRepository,
    },
    payments::{PaymentIntentRequest, PaymentProvider},
};

/// Default currency for payment intents.
pub const DEFAULT_CURRENCY: &str = "usd";

#[derive(Clone)]
pub struct PgCheckoutService {
    db: Db,
    orders: PgOrdersRepository,
    products: PgProductsRepository,
    promotions: PgPromotionsRepository,
    payments: Option<Arc<dyn PaymentProvider>>,
    currency: String,
}

impl std::fmt::Debug for PgCheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCheckoutService")
            .field("payments_configured", &self.payments.is_some())
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

impl PgCheckoutService {
    /// Without a payment provider every checkout fails with
    /// [`CheckoutError::ServiceUnavailable`], before the request is validated.
    #[must_use]
    pub fn new(
        db: Db,
        payments: Option<Arc<dyn PaymentProvider>>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            promotions: PgPromotionsRepository::new(),
            payments,
            currency: currency.into(),
        }
    }

    async fn price_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: &CheckoutLine,
    ) -> Result<NewOrderItem, CheckoutError> {
        let quantity = u32::try_from(line.quantity).map_err(|_| PricingError::Overflow)?;

        let (target, name, price) = match (line.product_uuid, line.custom_drink_uuid) {
            (Some(product), None) => {
                let record = match self.products.get_product(tx, product).await {
                    Ok(record) if record.is_active => record,
                    Ok(_) | Err(sqlx::Error::RowNotFound) => {
                        return Err(CheckoutError::ProductNotFound(product));
                    }
                    Err(error) => return Err(error.into()),
                };

                (LineItemTarget::Product(product), record.name, record.price)
            }
            (None, Some(custom_drink)) => {
                let name = line
                    .name
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or(DEFAULT_DRINK_NAME);
                let drink = CustomDrink::from_options(name, &line.options)?;
                let price = drink.price()?;

                (LineItemTarget::CustomDrink(custom_drink), drink.name, price)
            }
            // Validation guarantees exactly one reference.
            _ => return Err(CheckoutError::Validation(Default::default())),
        };

        if let Some(client_price) = line.client_price
            && client_price != price
        {
            warn!(
                line = ?target,
                client_price,
                server_price = price,
                "client price differs from catalog price"
            );
        }

        Ok(NewOrderItem {
            uuid: OrderItemUuid::new(),
            target,
            name,
            quantity,
            price,
            total: line_total(price, quantity)?,
            options: line.options.clone(),
        })
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, request),
        fields(
            items = request.items.len(),
            order_uuid = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutResponse, CheckoutError> {
        let payments = self
            .payments
            .as_ref()
            .ok_or(CheckoutError::ServiceUnavailable)?;

        validate(&request).map_err(CheckoutError::Validation)?;

        let now = Timestamp::now();

        let mut tx = self.db.begin_transaction().await?;

        let mut items = Vec::with_capacity(request.items.len());

        for line in &request.items {
            items.push(self.price_line(&mut tx, line).await?);
        }

        let subtotal = items
            .iter()
            .try_fold(0_u64, |sum, item| sum.checked_add(item.total))
            .ok_or(PricingError::Overflow)?;

        let promotion = match request.promotion_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => self.promotions.find_by_code(&mut tx, code).await?,
            _ => None,
        };

        let discount = match &promotion {
            Some(promotion) => promotion.discount_for(subtotal, now)?,
            None => 0,
        };

        // Only promotions that actually discount the order are recorded, so
        // settlement counts a redemption exactly when one happened.
        let applied = promotion.filter(|_| discount > 0);

        let totals = OrderTotals::calculate(subtotal, discount)?;

        let order = NewOrder {
            uuid: OrderUuid::new(),
            order_number: generate_order_number(now, &mut rand::thread_rng()),
            customer_uuid: request.customer_uuid,
            email: normalise_email(&request.email).unwrap_or(request.email),
            totals,
            shipping_address: request.shipping_address,
            billing_address: request.billing_address,
            promotion_uuid: applied.as_ref().map(|promotion| promotion.uuid),
            promotion_code: applied.map(|promotion| promotion.code),
            items,
        };

        let created = self.orders.create_order(&mut tx, &order).await?;

        tx.commit().await?;

        let span = tracing::Span::current();
        span.record("order_uuid", tracing::field::display(created.uuid));
        span.record("total", created.totals.total);

        // An order whose intent request fails stays pending without an
        // intent reference.
        let intent = payments
            .create_payment_intent(&PaymentIntentRequest {
                amount: created.totals.total,
                currency: self.currency.clone(),
                order_uuid: created.uuid,
                order_number: created.order_number.clone(),
            })
            .await?;

        let mut tx = self.db.begin_transaction().await?;

        self.orders
            .set_payment_intent(&mut tx, created.uuid, &intent.id)
            .await?;

        tx.commit().await?;

        info!(order_number = %created.order_number, "created order");

        Ok(CheckoutResponse {
            order_uuid: created.uuid,
            order_number: created.order_number,
            client_secret: intent.client_secret,
            total: created.totals.total,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Price the submitted lines, persist a pending order and request a
    /// payment intent for its total.
    async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutResponse, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{
            custom_drinks::CustomDrinkUuid,
            orders::OrderStatus,
            products::{
                ProductsService,
                records::{ProductCategory, ProductRecord, ProductUuid},
            },
            promotions::PromotionsService,
        },
        payments::{MockPaymentProvider, PaymentError, PaymentIntent},
        test::{
            TestContext,
            helpers::{address, new_product, summer20},
        },
    };

    use super::*;

    fn intent_provider(times: usize) -> Arc<dyn PaymentProvider> {
        let mut provider = MockPaymentProvider::new();

        provider
            .expect_create_payment_intent()
            .times(times)
            .returning(|request| {
                Ok(PaymentIntent {
                    id: format!("pi_{}", request.order_uuid.into_uuid().simple()),
                    client_secret: "pi_secret".to_string(),
                })
            });

        Arc::new(provider)
    }

    fn request(items: Vec<CheckoutLine>) -> CheckoutRequest {
        CheckoutRequest {
            items,
            shipping_address: address(),
            billing_address: None,
            email: "Fan@Example.com".to_string(),
            promotion_code: None,
            customer_uuid: None,
        }
    }

    fn product_line(product: &ProductRecord, quantity: i64) -> CheckoutLine {
        CheckoutLine {
            product_uuid: Some(product.uuid),
            quantity,
            client_price: Some(product.price),
            ..CheckoutLine::default()
        }
    }

    async fn order_count(ctx: &TestContext) -> TestResult<i64> {
        Ok(query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(ctx.db.pool())
            .await?)
    }

    #[tokio::test]
    async fn two_ten_dollar_items_produce_expected_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(Some(intent_provider(1)));
        let product = ctx
            .products
            .create_product(new_product("ten-dollar-juice", 1_000, 10, ProductCategory::Juices))
            .await?;

        let response = checkout.checkout(request(vec![product_line(&product, 2)])).await?;

        assert_eq!(response.total, 3_159);
        assert_eq!(response.client_secret, "pi_secret");
        assert!(response.order_number.starts_with("ORD-"), "got {}", response.order_number);

        let order = ctx.order(response.order_uuid).await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.email, "fan@example.com");
        assert_eq!(
            order.totals,
            OrderTotals {
                subtotal: 2_000,
                tax: 160,
                shipping: 999,
                discount: 0,
                total: 3_159,
            }
        );
        assert_eq!(
            order.payment_intent_id,
            Some(format!("pi_{}", response.order_uuid.into_uuid().simple()))
        );

        let items = ctx.order_items(response.order_uuid).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.iter().map(|item| item.total).sum::<u64>(), order.totals.subtotal);

        Ok(())
    }

    #[tokio::test]
    async fn summer20_below_minimum_gives_no_discount() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(Some(intent_provider(1)));
        let now = Timestamp::now();

        ctx.promotions
            .create_promotion(summer20(
                now.checked_sub(jiff::SignedDuration::from_hours(24))?,
                now.checked_add(jiff::SignedDuration::from_hours(24))?,
            ))
            .await?;

        let product = ctx
            .products
            .create_product(new_product("ten-dollar-juice", 1_000, 10, ProductCategory::Juices))
            .await?;

        let mut request = request(vec![product_line(&product, 2)]);
        request.promotion_code = Some("SUMMER20".to_string());

        let response = checkout.checkout(request).await?;
        let order = ctx.order(response.order_uuid).await?;

        assert_eq!(order.totals.discount, 0);
        assert_eq!(response.total, 3_159);
        assert_eq!(order.promotion_uuid, None, "unapplied promotion is not recorded");

        Ok(())
    }

    #[tokio::test]
    async fn applied_promotion_is_recorded_on_order() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(Some(intent_provider(1)));
        let now = Timestamp::now();

        let promotion = ctx
            .promotions
            .create_promotion(summer20(
                now.checked_sub(jiff::SignedDuration::from_hours(24))?,
                now.checked_add(jiff::SignedDuration::from_hours(24))?,
            ))
            .await?;

        let product = ctx
            .products
            .create_product(new_product("fifteen-dollar-juice", 1_500, 10, ProductCategory::Juices))
            .await?;

        let mut request = request(vec![product_line(&product, 2)]);
        request.promotion_code = Some("SUMMER20".to_string());

        let response = checkout.checkout(request).await?;
        let order = ctx.order(response.order_uuid).await?;

        // 20% of 30.00 is 6.00, capped at 10.00.
        assert_eq!(order.totals.discount, 600);
        assert_eq!(order.totals.shipping, 999);
        assert_eq!(order.promotion_uuid, Some(promotion.uuid));
        assert_eq!(order.promotion_code.as_deref(), Some("SUMMER20"));

        Ok(())
    }

    #[tokio::test]
    async fn client_prices_are_replaced_by_catalog_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(Some(intent_provider(1)));
        let product = ctx
            .products
            .create_product(new_product("ten-dollar-juice", 1_000, 10, ProductCategory::Juices))
            .await?;

        let mut line = product_line(&product, 1);
        line.client_price = Some(1);

        let response = checkout.checkout(request(vec![line])).await?;
        let items = ctx.order_items(response.order_uuid).await?;

        assert_eq!(items.first().map(|item| item.price), Some(1_000));

        Ok(())
    }

    #[tokio::test]
    async fn custom_drinks_are_priced_from_their_options() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(Some(intent_provider(1)));

        let line = CheckoutLine {
            custom_drink_uuid: Some(CustomDrinkUuid::new()),
            name: Some("Sunrise".to_string()),
            quantity: 1,
            options: match json!({
                "baseFlavor": "Mango",
                "size": "large",
                "addOns": ["Chia Seeds"],
            }) {
                serde_json::Value::Object(map) => map,
                _ => serde_json::Map::new(),
            },
            ..CheckoutLine::default()
        };

        let response = checkout.checkout(request(vec![line])).await?;
        let items = ctx.order_items(response.order_uuid).await?;

        assert_eq!(items.first().map(|item| (item.name.as_str(), item.price)), Some(("Sunrise", 949)));

        Ok(())
    }

    #[tokio::test]
    async fn line_without_reference_persists_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(Some(intent_provider(0)));

        let line = CheckoutLine {
            quantity: 1,
            client_price: Some(1_000),
            ..CheckoutLine::default()
        };

        let result = checkout.checkout(request(vec![line])).await;

        assert!(
            matches!(result, Err(CheckoutError::Validation(_))),
            "expected Validation, got {result:?}"
        );
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(Some(intent_provider(0)));
        let missing = ProductUuid::new();

        let line = CheckoutLine {
            product_uuid: Some(missing),
            quantity: 1,
            ..CheckoutLine::default()
        };

        let result = checkout.checkout(request(vec![line])).await;

        assert!(
            matches!(result, Err(CheckoutError::ProductNotFound(uuid)) if uuid == missing),
            "expected ProductNotFound, got {result:?}"
        );
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn missing_payment_provider_is_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(None);
        let product = ctx
            .products
            .create_product(new_product("ten-dollar-juice", 1_000, 10, ProductCategory::Juices))
            .await?;

        let result = checkout.checkout(request(vec![product_line(&product, 1)])).await;

        assert!(
            matches!(result, Err(CheckoutError::ServiceUnavailable)),
            "expected ServiceUnavailable, got {result:?}"
        );
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn missing_payment_provider_is_reported_before_validation() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = ctx.checkout_with(None);

        let line = CheckoutLine {
            quantity: 0,
            ..CheckoutLine::default()
        };

        let result = checkout.checkout(request(vec![line])).await;

        assert!(
            matches!(result, Err(CheckoutError::ServiceUnavailable)),
            "expected ServiceUnavailable, got {result:?}"
        );
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn processor_failure_leaves_pending_order_without_intent() -> TestResult {
        let ctx = TestContext::new().await;
        let mut provider = MockPaymentProvider::new();

        provider
            .expect_create_payment_intent()
            .once()
            .returning(|_| Err(PaymentError::UnexpectedResponse("boom".to_string())));

        let checkout = ctx.checkout_with(Some(Arc::new(provider)));
        let product = ctx
            .products
            .create_product(new_product("ten-dollar-juice", 1_000, 10, ProductCategory::Juices))
            .await?;

        let result = checkout.checkout(request(vec![product_line(&product, 1)])).await;

        assert!(
            matches!(result, Err(CheckoutError::Payment(_))),
            "expected Payment, got {result:?}"
        );

        let intent: Option<String> = query_scalar("SELECT payment_intent_id FROM orders")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(intent, None);

        Ok(())
    }
}
