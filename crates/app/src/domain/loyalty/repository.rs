//! Loyalty Repository

use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::{
    auth::models::CustomerUuid,
    database::amount_to_i64,
    domain::{
        loyalty::{LoyaltyPointUuid, ORDER_PURCHASE_REASON},
        orders::OrderUuid,
    },
};

const AWARD_POINTS_SQL: &str = include_str!("sql/award_points.sql");
const POINTS_BALANCE_SQL: &str = include_str!("sql/points_balance.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLoyaltyRepository;

impl PgLoyaltyRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record points for an order. At most one entry exists per order, so
    /// a repeated award returns zero rows.
    pub(crate) async fn award_for_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
        points: u64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(AWARD_POINTS_SQL)
            .bind(LoyaltyPointUuid::new().into_uuid())
            .bind(customer.into_uuid())
            .bind(order.into_uuid())
            .bind(amount_to_i64(points, "points")?)
            .bind(ORDER_PURCHASE_REASON)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(POINTS_BALANCE_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}
