//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{
            Customer, CustomerProfile, CustomerUuid, IssuedCustomerToken, NewCustomer,
            NewCustomerToken,
        },
        repository::PgAuthRepository,
        token::{
            CustomerTokenSecret, CustomerTokenVersion, format_customer_token,
            hash_customer_token, parse_customer_token,
        },
    },
    database::Db,
    domain::{loyalty::repository::PgLoyaltyRepository, newsletter::normalise_email},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    loyalty: PgLoyaltyRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
            loyalty: PgLoyaltyRepository::new(),
            db,
        }
    }

    /// Register a customer record.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::InvalidData`] for a malformed email and
    /// [`AuthServiceError::AlreadyExists`] when the email is taken.
    pub async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, AuthServiceError> {
        let email = normalise_email(&customer.email).ok_or(AuthServiceError::InvalidData)?;

        self.repository
            .create_customer(&NewCustomer { email, ..customer })
            .await
            .map_err(AuthServiceError::from)
    }

    /// Issue a new bearer token for a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or the insert fails.
    pub async fn issue_token(
        &self,
        customer: CustomerUuid,
    ) -> Result<IssuedCustomerToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = CustomerTokenVersion::V1;
        let secret = CustomerTokenSecret::generate();
        let token = format_customer_token(token_uuid, version, &secret);

        let metadata = self
            .repository
            .create_customer_token(&NewCustomerToken {
                uuid: token_uuid,
                customer_uuid: customer,
                version,
                token_hash: hash_customer_token(&token),
            })
            .await?;

        Ok(IssuedCustomerToken { token, metadata })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_customer_token(token_uuid)
            .await
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CustomerUuid, AuthServiceError> {
        let parsed = parse_customer_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_token_by_hash(&hash_customer_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.uuid != parsed.token_uuid || token.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        // Last-used tracking is best-effort.
        if let Err(error) = self.repository.touch_customer_token(token.uuid).await {
            debug!(%error, "failed to record token use");
        }

        Ok(token.customer_uuid)
    }

    #[tracing::instrument(name = "auth.service.get_customer", skip(self), err)]
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerProfile, AuthServiceError> {
        let customer = self.repository.get_customer(customer).await?;

        let mut tx = self.db.begin_transaction().await?;
        let loyalty_points = self.loyalty.balance(&mut tx, customer.uuid).await?;
        tx.commit().await?;

        Ok(CustomerProfile {
            customer,
            loyalty_points,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the customer it belongs to.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CustomerUuid, AuthServiceError>;

    /// Load a customer and their loyalty balance.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerProfile, AuthServiceError>;
}
