//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        models::{Cart, CartItemUuid, CartSessionUuid, LineItemTarget, NewCartItem},
        repositories::CartRepository,
    },
    custom_drinks::CustomDrink,
    products::ProductsService,
};

/// Cart service over any [`CartRepository`]. Product lines are priced from
/// the catalog and custom drinks from the builder formula, whatever price
/// the caller supplied.
pub struct StoredCartsService<R> {
    repository: R,
    products: Arc<dyn ProductsService>,
}

impl<R> StoredCartsService<R>
where
    R: CartRepository,
{
    #[must_use]
    pub fn new(repository: R, products: Arc<dyn ProductsService>) -> Self {
        Self {
            repository,
            products,
        }
    }

    async fn load(&self, session: CartSessionUuid) -> Result<Cart, CartsServiceError> {
        Ok(self.repository.load(session).await?.unwrap_or_default())
    }

    /// Replace the caller's price and name with authoritative ones, checking
    /// stock for `quantity` units of a product.
    async fn price_item(
        &self,
        mut item: NewCartItem,
        quantity: u32,
    ) -> Result<NewCartItem, CartsServiceError> {
        match item.target {
            LineItemTarget::Product(uuid) => {
                let product = self.products.get_product(uuid).await?;

                if !product.is_active {
                    return Err(CartsServiceError::ProductNotFound);
                }

                if !product.has_stock_for(quantity) {
                    return Err(CartsServiceError::InsufficientInventory {
                        available: product.inventory,
                    });
                }

                item.name = product.name;
                item.unit_price = product.price;
            }
            LineItemTarget::CustomDrink(_) => {
                let drink = CustomDrink::from_options(&item.name, &item.options)?;

                item.unit_price = drink.price()?;
            }
        }

        Ok(item)
    }
}

impl<R> std::fmt::Debug for StoredCartsService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCartsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl<R> CartsService for StoredCartsService<R>
where
    R: CartRepository,
{
    async fn get_cart(&self, session: CartSessionUuid) -> Result<Cart, CartsServiceError> {
        self.load(session).await
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(session = %session, quantity = item.quantity),
        err
    )]
    async fn add_item(
        &self,
        session: CartSessionUuid,
        item: NewCartItem,
    ) -> Result<Cart, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidItem(
                "quantity must be at least 1".to_string(),
            ));
        }

        let mut cart = self.load(session).await?;

        let merged_quantity = cart
            .find_matching(&item)
            .map_or(item.quantity, |line| line.quantity.saturating_add(item.quantity));

        let item = self.price_item(item, merged_quantity).await?;

        cart.add_item(item);

        self.repository.save(session, &cart).await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_quantity",
        skip(self),
        fields(session = %session, item = %item),
        err
    )]
    async fn update_quantity(
        &self,
        session: CartSessionUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load(session).await?;

        let line = cart.get_item(item).ok_or(CartsServiceError::ItemNotFound)?;

        if quantity > 0
            && let Some(product) = line.target.product()
        {
            let wanted = u32::try_from(quantity).unwrap_or(u32::MAX);
            let product = self.products.get_product(product).await?;

            if !product.has_stock_for(wanted) {
                return Err(CartsServiceError::InsufficientInventory {
                    available: product.inventory,
                });
            }
        }

        cart.update_quantity(item, quantity)?;

        self.repository.save(session, &cart).await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(session = %session, item = %item),
        err
    )]
    async fn remove_item(
        &self,
        session: CartSessionUuid,
        item: CartItemUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load(session).await?;

        cart.remove_item(item)?;

        self.repository.save(session, &cart).await?;

        Ok(cart)
    }

    #[tracing::instrument(name = "carts.service.clear", skip(self), fields(session = %session), err)]
    async fn clear(&self, session: CartSessionUuid) -> Result<(), CartsServiceError> {
        self.repository.delete(session).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the cart for a session. Unknown sessions have an empty cart.
    async fn get_cart(&self, session: CartSessionUuid) -> Result<Cart, CartsServiceError>;

    /// Add a line to the session's cart, merging with an identical line.
    async fn add_item(
        &self,
        session: CartSessionUuid,
        item: NewCartItem,
    ) -> Result<Cart, CartsServiceError>;

    /// Change a line's quantity; zero or less removes the line.
    async fn update_quantity(
        &self,
        session: CartSessionUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line from the session's cart.
    async fn remove_item(
        &self,
        session: CartSessionUuid,
        item: CartItemUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Empty the session's cart.
    async fn clear(&self, session: CartSessionUuid) -> Result<(), CartsServiceError>;
}
