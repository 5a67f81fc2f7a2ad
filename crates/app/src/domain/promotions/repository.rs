//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{
        amount_to_i64, optional_amount_to_i64, try_get_amount, try_get_optional_amount,
    },
    domain::promotions::{
        data::{DiscountKind, NewPromotion},
        records::{PromotionRecord, PromotionUuid},
    },
};

const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const FIND_PROMOTION_BY_CODE_SQL: &str = include_str!("sql/find_promotion_by_code.sql");
const INCREMENT_PROMOTION_USAGE_SQL: &str = include_str!("sql/increment_promotion_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: &NewPromotion,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(CREATE_PROMOTION_SQL)
            .bind(promotion.uuid.into_uuid())
            .bind(&promotion.code)
            .bind(&promotion.name)
            .bind(promotion.description.as_deref())
            .bind(promotion.discount.to_str())
            .bind(amount_to_i64(promotion.discount.value(), "discount_value")?)
            .bind(optional_amount_to_i64(promotion.min_amount, "min_amount")?)
            .bind(optional_amount_to_i64(promotion.max_discount, "max_discount")?)
            .bind(optional_amount_to_i64(promotion.usage_limit, "usage_limit")?)
            .bind(SqlxTimestamp::from(promotion.starts_at))
            .bind(SqlxTimestamp::from(promotion.ends_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(FIND_PROMOTION_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Count one redemption. Returns the number of rows updated, which is
    /// zero when the usage limit has already been reached.
    pub(crate) async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_PROMOTION_USAGE_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_type: String = row.try_get("discount_type")?;
        let discount_value = try_get_amount(row, "discount_value")?;

        let discount = match discount_type.as_str() {
            "percentage_off" => DiscountKind::PercentageOff {
                percentage: u16::try_from(discount_value).map_err(|e| {
                    sqlx::Error::ColumnDecode {
                        index: "discount_value".to_string(),
                        source: Box::new(e),
                    }
                })?,
            },
            "amount_off" => DiscountKind::AmountOff {
                amount: discount_value,
            },
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "discount_type".to_string(),
                    source: format!("unknown discount type {other:?}").into(),
                });
            }
        };

        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            discount,
            min_amount: try_get_optional_amount(row, "min_amount")?,
            max_discount: try_get_optional_amount(row, "max_discount")?,
            usage_limit: try_get_optional_amount(row, "usage_limit")?,
            usage_count: try_get_amount(row, "usage_count")?,
            is_active: row.try_get("is_active")?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
