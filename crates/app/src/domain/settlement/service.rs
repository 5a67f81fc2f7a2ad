//! Settlement Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::models::LineItemTarget,
        loyalty::repository::PgLoyaltyRepository,
        orders::{
            OrderItemRecord, OrderRecord, OrderStatus, OrderUuid, PaymentEvent, TransitionError,
            repository::PgOrdersRepository,
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
        promotions::repository::PgPromotionsRepository,
        settlement::errors::SettlementError,
    },
    notifications::{Mailer, templates::order_confirmation},
};

/// A verified payment outcome for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNotification {
    pub event: PaymentEvent,
    pub intent_id: String,
    pub order_uuid: OrderUuid,
}

/// What settling an order changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub order_uuid: OrderUuid,
    pub status: OrderStatus,
    pub loyalty_points: u64,

    /// Paid product lines whose stock could not cover the quantity. Their
    /// inventory is left as it was.
    pub short_products: Vec<ProductUuid>,
}

#[derive(Clone)]
pub struct PgSettlementService {
    db: Db,
    orders: PgOrdersRepository,
    products: PgProductsRepository,
    promotions: PgPromotionsRepository,
    loyalty: PgLoyaltyRepository,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for PgSettlementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgSettlementService").finish_non_exhaustive()
    }
}

impl PgSettlementService {
    #[must_use]
    pub fn new(db: Db, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            promotions: PgPromotionsRepository::new(),
            loyalty: PgLoyaltyRepository::new(),
            mailer,
        }
    }

    async fn send_confirmation(&self, order: &OrderRecord, items: &[OrderItemRecord]) {
        let message = order_confirmation(order, items);

        if let Err(error) = self.mailer.send(&message).await {
            warn!(%error, order_uuid = %order.uuid, "failed to send order confirmation");
        }
    }
}

#[async_trait]
impl SettlementService for PgSettlementService {
    #[tracing::instrument(
        name = "settlement.service.settle",
        skip(self, notification),
        fields(
            order_uuid = %notification.order_uuid,
            intent_id = %notification.intent_id,
            event = ?notification.event
        ),
        err
    )]
    async fn settle(&self, notification: PaymentNotification) -> Result<Settlement, SettlementError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = match self.orders.lock_order(&mut tx, notification.order_uuid).await {
            Ok(order) => order,
            Err(sqlx::Error::RowNotFound) => return Err(SettlementError::OrderNotFound),
            Err(error) => return Err(error.into()),
        };

        if let Some(intent_id) = &order.payment_intent_id
            && *intent_id != notification.intent_id
        {
            return Err(SettlementError::IntentMismatch);
        }

        let status = order
            .status
            .transition(notification.event)
            .map_err(|TransitionError::AlreadySettled(status)| SettlementError::AlreadySettled(status))?;

        self.orders.update_status(&mut tx, order.uuid, status).await?;

        order.status = status;

        if status != OrderStatus::Confirmed {
            tx.commit().await?;

            info!(status = status.as_str(), "order payment failed");

            return Ok(Settlement {
                order_uuid: order.uuid,
                status,
                loyalty_points: 0,
                short_products: Vec::new(),
            });
        }

        let items = self.orders.list_order_items(&mut tx, order.uuid).await?;

        let mut short_products = Vec::new();

        for item in &items {
            let LineItemTarget::Product(product) = item.target else {
                continue;
            };

            // The payment has been taken, so a short line is recorded for
            // fulfilment follow-up rather than undoing the settlement.
            if self
                .products
                .decrement_inventory(&mut tx, product, item.quantity)
                .await?
                == 0
            {
                warn!(
                    product_uuid = %product,
                    quantity = item.quantity,
                    "insufficient inventory for paid order line"
                );

                short_products.push(product);
            }
        }

        if let Some(promotion) = order.promotion_uuid
            && self.promotions.increment_usage(&mut tx, promotion).await? == 0
        {
            warn!(promotion_uuid = %promotion, "promotion usage limit already reached");
        }

        let mut loyalty_points = 0;

        if let Some(customer) = order.customer_uuid {
            let points = order.loyalty_points();

            if self
                .loyalty
                .award_for_order(&mut tx, customer, order.uuid, points)
                .await?
                > 0
            {
                loyalty_points = points;
            }
        }

        tx.commit().await?;

        info!(loyalty_points, "order confirmed");

        self.send_confirmation(&order, &items).await;

        Ok(Settlement {
            order_uuid: order.uuid,
            status,
            loyalty_points,
            short_products,
        })
    }
}

#[automock]
#[async_trait]
pub trait SettlementService: Send + Sync {
    /// Apply a payment outcome to its order. Each order settles once;
    /// repeated notifications report [`SettlementError::AlreadySettled`].
    async fn settle(&self, notification: PaymentNotification) -> Result<Settlement, SettlementError>;
}
