//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{
    models::{
        ActiveCustomerToken, Customer, CustomerTokenMetadata, CustomerUuid, NewCustomer,
        NewCustomerToken,
    },
    token::CustomerTokenVersion,
};

const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const CREATE_CUSTOMER_TOKEN_SQL: &str = include_str!("sql/create_customer_token.sql");
const FIND_ACTIVE_TOKEN_BY_HASH_SQL: &str = include_str!("sql/find_active_token_by_hash.sql");
const TOUCH_CUSTOMER_TOKEN_SQL: &str = include_str!("sql/touch_customer_token.sql");
const REVOKE_CUSTOMER_TOKEN_SQL: &str = include_str!("sql/revoke_customer_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_customer(
        &self,
        customer: &NewCustomer,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(CREATE_CUSTOMER_SQL)
            .bind(customer.uuid.into_uuid())
            .bind(&customer.email)
            .bind(customer.first_name.as_deref())
            .bind(customer.last_name.as_deref())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_customer_token(
        &self,
        token: &NewCustomerToken,
    ) -> Result<CustomerTokenMetadata, sqlx::Error> {
        query_as::<Postgres, CustomerTokenMetadata>(CREATE_CUSTOMER_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.customer_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_active_token_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<ActiveCustomerToken>, sqlx::Error> {
        query_as::<Postgres, ActiveCustomerToken>(FIND_ACTIVE_TOKEN_BY_HASH_SQL)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_customer_token(&self, token: Uuid) -> Result<(), sqlx::Error> {
        query(TOUCH_CUSTOMER_TOKEN_SQL)
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns whether an active token was revoked.
    pub(crate) async fn revoke_customer_token(&self, token: Uuid) -> Result<bool, sqlx::Error> {
        let rows_affected = query(REVOKE_CUSTOMER_TOKEN_SQL)
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

fn token_version(row: &PgRow) -> sqlx::Result<CustomerTokenVersion> {
    let version: i16 = row.try_get("version")?;

    CustomerTokenVersion::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
        index: "version".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveCustomerToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            version: token_version(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            version: token_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(|ts| ts.to_jiff()),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(|ts| ts.to_jiff()),
        })
    }
}
