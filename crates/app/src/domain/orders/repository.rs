//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::{
    auth::models::CustomerUuid,
    database::{amount_to_i64, try_get_amount},
    domain::{
        carts::models::{LineItemTarget, OptionBag},
        custom_drinks::CustomDrinkUuid,
        orders::{
            records::{
                Address, NewOrder, NewOrderItem, OrderItemRecord, OrderItemUuid, OrderRecord,
                OrderUuid,
            },
            status::OrderStatus,
        },
        pricing::OrderTotals,
        products::records::ProductUuid,
        promotions::records::PromotionUuid,
    },
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const SET_PAYMENT_INTENT_SQL: &str = include_str!("sql/set_payment_intent.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a pending order and all of its lines.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let totals = &order.totals;

        let created = query_as::<Postgres, OrderRecord>(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(&order.order_number)
            .bind(order.customer_uuid.map(CustomerUuid::into_uuid))
            .bind(&order.email)
            .bind(amount_to_i64(totals.subtotal, "subtotal")?)
            .bind(amount_to_i64(totals.tax, "tax")?)
            .bind(amount_to_i64(totals.shipping, "shipping")?)
            .bind(amount_to_i64(totals.discount, "discount")?)
            .bind(amount_to_i64(totals.total, "total")?)
            .bind(Json(&order.shipping_address))
            .bind(order.billing_address.as_ref().map(Json))
            .bind(order.promotion_uuid.map(PromotionUuid::into_uuid))
            .bind(order.promotion_code.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        for item in &order.items {
            self.create_order_item(tx, created.uuid, item).await?;
        }

        Ok(created)
    }

    async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &NewOrderItem,
    ) -> Result<(), sqlx::Error> {
        let (product, custom_drink): (Option<Uuid>, Option<Uuid>) = match item.target {
            LineItemTarget::Product(uuid) => (Some(uuid.into_uuid()), None),
            LineItemTarget::CustomDrink(uuid) => (None, Some(uuid.into_uuid())),
        };

        query(INSERT_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(product)
            .bind(custom_drink)
            .bind(&item.name)
            .bind(i64::from(item.quantity))
            .bind(amount_to_i64(item.price, "price")?)
            .bind(amount_to_i64(item.total, "total")?)
            .bind(Json(&item.options))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_payment_intent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        payment_intent_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PAYMENT_INTENT_SQL)
            .bind(order.into_uuid())
            .bind(payment_intent_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Persist a status, writing the derived payment status alongside.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(status.payment_status().as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

fn decode_error(column: &str, source: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| decode_error("status", e))?;

        let Json(shipping_address) = row.try_get::<Json<Address>, _>("shipping_address")?;
        let billing_address = row
            .try_get::<Option<Json<Address>>, _>("billing_address")?
            .map(|Json(address)| address);

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            customer_uuid: row
                .try_get::<Option<Uuid>, _>("customer_uuid")?
                .map(CustomerUuid::from_uuid),
            email: row.try_get("email")?,
            status,
            totals: OrderTotals {
                subtotal: try_get_amount(row, "subtotal")?,
                tax: try_get_amount(row, "tax")?,
                shipping: try_get_amount(row, "shipping")?,
                discount: try_get_amount(row, "discount")?,
                total: try_get_amount(row, "total")?,
            },
            shipping_address,
            billing_address,
            promotion_uuid: row
                .try_get::<Option<Uuid>, _>("promotion_uuid")?
                .map(PromotionUuid::from_uuid),
            promotion_code: row.try_get("promotion_code")?,
            payment_intent_id: row.try_get("payment_intent_id")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product: Option<Uuid> = row.try_get("product_uuid")?;
        let custom_drink: Option<Uuid> = row.try_get("custom_drink_uuid")?;

        let target = match (product, custom_drink) {
            (Some(uuid), None) => LineItemTarget::Product(ProductUuid::from_uuid(uuid)),
            (None, Some(uuid)) => LineItemTarget::CustomDrink(CustomDrinkUuid::from_uuid(uuid)),
            _ => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "product_uuid".to_string(),
                    source: "order item must reference exactly one target".into(),
                });
            }
        };

        let quantity: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            target,
            name: row.try_get("name")?,
            quantity,
            price: try_get_amount(row, "price")?,
            total: try_get_amount(row, "total")?,
            options: row
                .try_get::<Option<Json<OptionBag>>, _>("options")?
                .map(|Json(options)| options)
                .unwrap_or_default(),
        })
    }
}
