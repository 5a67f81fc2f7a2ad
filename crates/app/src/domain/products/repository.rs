//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{
        amount_to_i64, optional_amount_to_i64, try_get_amount, try_get_optional_amount,
    },
    domain::products::{
        data::{NewProduct, ProductQuery},
        records::{ProductCategory, ProductRecord, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const LIST_RELATED_PRODUCTS_SQL: &str = include_str!("sql/list_related_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const DECREMENT_INVENTORY_SQL: &str = include_str!("sql/decrement_inventory.sql");

/// Number of related products shown alongside a product.
pub(crate) const RELATED_PRODUCTS_LIMIT: i64 = 4;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filters: &ProductQuery,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let limit = i64::from(filters.limit);
        let offset = amount_to_i64(filters.offset(), "offset")?;

        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filters.category.map(ProductCategory::as_str))
            .bind(filters.search_pattern())
            .bind(optional_amount_to_i64(filters.min_price, "min_price")?)
            .bind(optional_amount_to_i64(filters.max_price, "max_price")?)
            .bind(filters.featured_only)
            .bind(filters.sort_by.as_str())
            .bind(filters.sort_order.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filters: &ProductQuery,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(filters.category.map(ProductCategory::as_str))
            .bind(filters.search_pattern())
            .bind(optional_amount_to_i64(filters.min_price, "min_price")?)
            .bind(optional_amount_to_i64(filters.max_price, "max_price")?)
            .bind(filters.featured_only)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })
    }

    /// Fetch a product by uuid regardless of its active flag.
    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_related_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_RELATED_PRODUCTS_SQL)
            .bind(product.category.as_str())
            .bind(product.uuid.into_uuid())
            .bind(RELATED_PRODUCTS_LIMIT)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.slug)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.short_description.as_deref())
            .bind(product.sku.as_deref())
            .bind(amount_to_i64(product.price, "price")?)
            .bind(optional_amount_to_i64(product.compare_price, "compare_price")?)
            .bind(amount_to_i64(product.inventory, "inventory")?)
            .bind(product.category.as_str())
            .bind(&product.tags)
            .bind(&product.ingredients)
            .bind(product.is_featured)
            .fetch_one(&mut **tx)
            .await
    }

    /// Remove `quantity` units from stock only when enough remain.
    ///
    /// Returns the number of rows updated: zero means the product is
    /// missing or has insufficient inventory, and nothing changed.
    pub(crate) async fn decrement_inventory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_INVENTORY_SQL)
            .bind(product.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category: String = row.try_get("category")?;

        let category =
            category
                .parse::<ProductCategory>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "category".to_string(),
                    source: Box::new(e),
                })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            short_description: row.try_get("short_description")?,
            sku: row.try_get("sku")?,
            price: try_get_amount(row, "price")?,
            compare_price: try_get_optional_amount(row, "compare_price")?,
            inventory: try_get_amount(row, "inventory")?,
            category,
            tags: row.try_get("tags")?,
            ingredients: row.try_get("ingredients")?,
            is_active: row.try_get("is_active")?,
            is_featured: row.try_get("is_featured")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
