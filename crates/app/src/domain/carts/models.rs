//! Cart Models

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::{
        carts::errors::CartsServiceError,
        custom_drinks::CustomDrinkUuid,
        pricing::{PricingError, line_total},
        products::records::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Free-form options attached to a line, compared structurally when merging.
pub type OptionBag = Map<String, Value>;

/// Cart session UUID, handed to the client in the `x-cart-session` header.
pub type CartSessionUuid = TypedUuid<Cart>;

/// Cart line UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// What a line is for: a catalog product or a custom drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "uuid", rename_all = "snake_case")]
pub enum LineItemTarget {
    Product(ProductUuid),
    CustomDrink(CustomDrinkUuid),
}

impl LineItemTarget {
    #[must_use]
    pub const fn product(self) -> Option<ProductUuid> {
        match self {
            Self::Product(uuid) => Some(uuid),
            Self::CustomDrink(_) => None,
        }
    }
}

/// Cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub target: LineItemTarget,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    #[serde(default)]
    pub options: OptionBag,
}

impl CartItem {
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line total does not fit.
    pub fn total(&self) -> Result<u64, PricingError> {
        line_total(self.unit_price, self.quantity)
    }

    fn matches(&self, item: &NewCartItem) -> bool {
        self.target == item.target && same_options(&self.options, &item.options)
    }
}

/// Option bags are equal when their JSON text would be: key order is
/// ignored and numbers compare by value, so `1` and `1.0` match.
fn same_options(a: &OptionBag, b: &OptionBag) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| same_value(value, other)))
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            a == b
                || matches!(
                    (a.as_f64(), b.as_f64()),
                    (Some(x), Some(y)) if x.partial_cmp(&y) == Some(Ordering::Equal)
                )
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_value(a, b))
        }
        (Value::Object(a), Value::Object(b)) => same_options(a, b),
        _ => a == b,
    }
}

/// A line to add to a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub target: LineItemTarget,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub options: OptionBag,
}

/// Cart Model
///
/// Mutations are pure; persisting the result is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Add a line, merging into an existing one when the target and the
    /// option bag are equal. Returns the resulting line.
    pub fn add_item(&mut self, item: NewCartItem) -> CartItem {
        if let Some(existing) = self.items.iter_mut().find(|line| line.matches(&item)) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            existing.unit_price = item.unit_price;

            return existing.clone();
        }

        let line = CartItem {
            uuid: CartItemUuid::new(),
            target: item.target,
            name: item.name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            options: item.options,
        };

        self.items.push(line.clone());

        line
    }

    /// The line that `item` would merge into, if any.
    #[must_use]
    pub fn find_matching(&self, item: &NewCartItem) -> Option<&CartItem> {
        self.items.iter().find(|line| line.matches(item))
    }

    #[must_use]
    pub fn get_item(&self, item: CartItemUuid) -> Option<&CartItem> {
        self.items.iter().find(|line| line.uuid == item)
    }

    /// Set a line's quantity; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::ItemNotFound`] for an unknown line.
    pub fn update_quantity(
        &mut self,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<(), CartsServiceError> {
        if quantity <= 0 {
            return self.remove_item(item);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let line = self
            .items
            .iter_mut()
            .find(|line| line.uuid == item)
            .ok_or(CartsServiceError::ItemNotFound)?;

        line.quantity = quantity;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CartsServiceError::ItemNotFound`] for an unknown line.
    pub fn remove_item(&mut self, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let before = self.items.len();

        self.items.retain(|line| line.uuid != item);

        if self.items.len() == before {
            return Err(CartsServiceError::ItemNotFound);
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of unit price times quantity over every line.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the sum does not fit.
    pub fn subtotal(&self) -> Result<u64, PricingError> {
        self.items.iter().try_fold(0_u64, |sum, line| {
            sum.checked_add(line.total()?).ok_or(PricingError::Overflow)
        })
    }

    /// Total number of units across lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
