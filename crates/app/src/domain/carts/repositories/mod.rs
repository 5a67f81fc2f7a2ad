//! Cart Repositories
//!
//! Carts are stored whole, keyed by session. Every mutation writes the full
//! cart back, and the last write wins.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::carts::{
    errors::CartsServiceError,
    models::{Cart, CartSessionUuid},
};

mod memory;
mod postgres;

pub use memory::InMemoryCartRepository;
pub use postgres::PgCartRepository;

#[automock]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Load the cart for a session, if one has been saved.
    async fn load(&self, session: CartSessionUuid) -> Result<Option<Cart>, CartsServiceError>;

    /// Replace the stored cart for a session.
    async fn save(&self, session: CartSessionUuid, cart: &Cart) -> Result<(), CartsServiceError>;

    /// Forget a session's cart. Unknown sessions are not an error.
    async fn delete(&self, session: CartSessionUuid) -> Result<(), CartsServiceError>;
}
