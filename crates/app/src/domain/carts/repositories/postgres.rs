//! Server-side cart sessions, one JSONB row per session.

use async_trait::async_trait;
use sqlx::{Postgres, query, query_scalar, types::Json};

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsServiceError,
        models::{Cart, CartItem, CartSessionUuid},
        repositories::CartRepository,
    },
};

const LOAD_CART_SESSION_SQL: &str = include_str!("sql/load_cart_session.sql");
const SAVE_CART_SESSION_SQL: &str = include_str!("sql/save_cart_session.sql");
const DELETE_CART_SESSION_SQL: &str = include_str!("sql/delete_cart_session.sql");

#[derive(Debug, Clone)]
pub struct PgCartRepository {
    db: Db,
}

impl PgCartRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn load(&self, session: CartSessionUuid) -> Result<Option<Cart>, CartsServiceError> {
        let items = query_scalar::<Postgres, Json<Vec<CartItem>>>(LOAD_CART_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(items.map(|Json(items)| Cart { items }))
    }

    async fn save(&self, session: CartSessionUuid, cart: &Cart) -> Result<(), CartsServiceError> {
        query(SAVE_CART_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(Json(&cart.items))
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn delete(&self, session: CartSessionUuid) -> Result<(), CartsServiceError> {
        query(DELETE_CART_SESSION_SQL)
            .bind(session.into_uuid())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::models::{LineItemTarget, NewCartItem, OptionBag},
            products::records::ProductUuid,
        },
        test::db::TestDb,
    };

    use super::*;

    #[tokio::test]
    async fn save_then_load_restores_lines() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = PgCartRepository::new(Db::new(test_db.pool().clone()));
        let session = CartSessionUuid::new();

        let mut options = OptionBag::new();
        options.insert("size".to_string(), json!("large"));

        let mut cart = Cart::default();
        cart.add_item(NewCartItem {
            target: LineItemTarget::Product(ProductUuid::new()),
            name: "Green Goddess".to_string(),
            quantity: 2,
            unit_price: 799,
            options,
        });

        repository.save(session, &cart).await?;

        assert_eq!(repository.load(session).await?, Some(cart.clone()));

        cart.clear();
        repository.save(session, &cart).await?;

        assert_eq!(
            repository.load(session).await?,
            Some(Cart::default()),
            "last write wins"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_forgets_the_session() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = PgCartRepository::new(Db::new(test_db.pool().clone()));
        let session = CartSessionUuid::new();

        repository.save(session, &Cart::default()).await?;
        repository.delete(session).await?;

        assert_eq!(repository.load(session).await?, None);

        Ok(())
    }
}
