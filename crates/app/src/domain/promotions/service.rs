//! Promotions Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::promotions::{
        PromotionsServiceError, data::NewPromotion, records::PromotionRecord,
        repository::PgPromotionsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(
            promotion_uuid = %promotion.uuid,
            promotion_code = %promotion.code,
            discount_type = promotion.discount.to_str()
        ),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        if promotion.code.trim().is_empty() || promotion.ends_at < promotion.starts_at {
            return Err(PromotionsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_promotion(&mut tx, &promotion)
            .await?;

        tx.commit().await?;

        info!("created promotion");

        Ok(created)
    }

    #[tracing::instrument(name = "promotions.service.get_promotion", skip(self), err)]
    async fn get_promotion(&self, code: &str) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotion = self
            .repository
            .find_by_code(&mut tx, code)
            .await?
            .ok_or(PromotionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(promotion)
    }

    #[tracing::instrument(name = "promotions.service.quote_discount", skip(self), err)]
    async fn quote_discount(
        &self,
        code: &str,
        subtotal: u64,
        now: Timestamp,
    ) -> Result<u64, PromotionsServiceError> {
        match self.get_promotion(code).await {
            Ok(promotion) => Ok(promotion.discount_for(subtotal, now)?),
            Err(PromotionsServiceError::NotFound) => Ok(0),
            Err(error) => Err(error),
        }
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Create a promotion code.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Look up an active promotion by its exact code.
    async fn get_promotion(&self, code: &str) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Discount the given code would grant on `subtotal` at `now`. Unknown
    /// codes quote zero.
    async fn quote_discount(
        &self,
        code: &str,
        subtotal: u64,
        now: Timestamp,
    ) -> Result<u64, PromotionsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::promotions::{data::DiscountKind, records::PromotionUuid},
        test::TestContext,
    };

    use super::*;

    fn summer20() -> Result<NewPromotion, jiff::Error> {
        Ok(NewPromotion {
            uuid: PromotionUuid::new(),
            code: "SUMMER20".to_string(),
            name: "Summer Special".to_string(),
            description: Some("20% off all smoothies".to_string()),
            discount: DiscountKind::PercentageOff { percentage: 20 },
            min_amount: Some(2_500),
            max_discount: Some(1_000),
            usage_limit: Some(1_000),
            starts_at: "2024-06-01T00:00:00Z".parse()?,
            ends_at: "2024-08-31T23:59:59Z".parse()?,
        })
    }

    #[tokio::test]
    async fn create_promotion_round_trips_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let new = summer20()?;

        let created = ctx.promotions.create_promotion(new.clone()).await?;
        let fetched = ctx.promotions.get_promotion("SUMMER20").await?;

        assert_eq!(created.uuid, new.uuid);
        assert_eq!(fetched.discount, DiscountKind::PercentageOff { percentage: 20 });
        assert_eq!(fetched.min_amount, Some(2_500));
        assert_eq!(fetched.max_discount, Some(1_000));
        assert_eq!(fetched.usage_count, 0);
        assert!(fetched.is_active, "new promotions are active");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions.create_promotion(summer20()?).await?;

        let result = ctx.promotions.create_promotion(summer20()?).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let mut new = summer20()?;

        std::mem::swap(&mut new.starts_at, &mut new.ends_at);

        let result = ctx.promotions.create_promotion(new).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn quote_discount_for_unknown_code_is_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let discount = ctx
            .promotions
            .quote_discount("NOPE", 10_000, Timestamp::now())
            .await?;

        assert_eq!(discount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn quote_discount_below_minimum_spend_is_zero() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.promotions.create_promotion(summer20()?).await?;

        let now: Timestamp = "2024-07-15T00:00:00Z".parse()?;

        assert_eq!(
            ctx.promotions.quote_discount("SUMMER20", 2_000, now).await?,
            0,
            "a $20 subtotal misses the $25 minimum"
        );
        assert_eq!(
            ctx.promotions.quote_discount("SUMMER20", 3_000, now).await?,
            600
        );

        Ok(())
    }
}
