//! Process-local cart storage.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;

use crate::domain::carts::{
    errors::CartsServiceError,
    models::{Cart, CartSessionUuid},
    repositories::CartRepository,
};

#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: Mutex<FxHashMap<CartSessionUuid, Cart>>,
}

impl InMemoryCartRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn load(&self, session: CartSessionUuid) -> Result<Option<Cart>, CartsServiceError> {
        Ok(self.carts.lock().await.get(&session).cloned())
    }

    async fn save(&self, session: CartSessionUuid, cart: &Cart) -> Result<(), CartsServiceError> {
        self.carts.lock().await.insert(session, cart.clone());

        Ok(())
    }

    async fn delete(&self, session: CartSessionUuid) -> Result<(), CartsServiceError> {
        self.carts.lock().await.remove(&session);

        Ok(())
    }
}
