//! Newsletter service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::newsletter::{
        email::normalise_email, errors::NewsletterError, repository::PgNewsletterRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgNewsletterService {
    db: Db,
    repository: PgNewsletterRepository,
}

impl PgNewsletterService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNewsletterRepository::new(),
        }
    }
}

#[async_trait]
impl NewsletterService for PgNewsletterService {
    #[tracing::instrument(name = "newsletter.service.subscribe", skip_all, err)]
    async fn subscribe(&self, email: &str) -> Result<bool, NewsletterError> {
        let email = normalise_email(email).ok_or(NewsletterError::InvalidEmail)?;

        let mut tx = self.db.begin_transaction().await?;

        let added = self.repository.subscribe(&mut tx, &email).await?;

        tx.commit().await?;

        info!(added, "newsletter subscription");

        Ok(added)
    }
}

#[automock]
#[async_trait]
pub trait NewsletterService: Send + Sync {
    /// Subscribe an address. Returns `true` when it was not already on the
    /// list; repeat subscriptions succeed without changes.
    async fn subscribe(&self, email: &str) -> Result<bool, NewsletterError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn subscribe_is_idempotent_per_normalised_address() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.newsletter.subscribe("fan@example.com").await?, "first signup adds");
        assert!(
            !ctx.newsletter.subscribe("  FAN@example.com ").await?,
            "same address after normalising is not added again"
        );

        let count: i64 = query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn subscribe_rejects_invalid_email() {
        let ctx = TestContext::new().await;

        let result = ctx.newsletter.subscribe("not an email").await;

        assert!(
            matches!(result, Err(NewsletterError::InvalidEmail)),
            "expected InvalidEmail, got {result:?}"
        );
    }
}
