//! Newsletter Repository

use sqlx::{Postgres, Transaction, query};
use uuid::Uuid;

const SUBSCRIBE_SQL: &str = include_str!("sql/subscribe.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNewsletterRepository;

impl PgNewsletterRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a subscriber unless the address is already present. Returns
    /// whether a row was added.
    pub(crate) async fn subscribe(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(SUBSCRIBE_SQL)
            .bind(Uuid::now_v7())
            .bind(email)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
