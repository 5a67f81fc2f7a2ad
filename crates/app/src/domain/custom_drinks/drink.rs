//! Custom Drink

use serde_json::{Map, Value};

use crate::{
    domain::custom_drinks::{
        catalog::{ADD_ON_PRICE, AddOn, DEFAULT_LEVEL, DrinkSize, Flavor},
        errors::CustomDrinkError,
    },
    uuids::TypedUuid,
};

/// Custom drink UUID, minted when a drink is added to a cart.
pub type CustomDrinkUuid = TypedUuid<CustomDrink>;

/// Option bag keys written for a custom drink line.
pub(crate) const BASE_FLAVOR_KEY: &str = "baseFlavor";
pub(crate) const SECONDARY_FLAVOR_KEY: &str = "secondaryFlavor";
pub(crate) const SIZE_KEY: &str = "size";
pub(crate) const ADD_ONS_KEY: &str = "addOns";

/// A validated custom drink composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDrink {
    pub name: String,
    pub base_flavor: Flavor,
    pub secondary_flavor: Option<Flavor>,
    pub size: DrinkSize,
    pub add_ons: Vec<AddOn>,
    pub sweetness: u8,
    pub ice_level: u8,
}

impl CustomDrink {
    /// `base(size) + 50¢ × add-ons`.
    ///
    /// # Errors
    ///
    /// Returns [`CustomDrinkError::Overflow`] if the sum does not fit.
    pub fn price(&self) -> Result<u64, CustomDrinkError> {
        let add_ons = u64::try_from(self.add_ons.len()).map_err(|_| CustomDrinkError::Overflow)?;

        ADD_ON_PRICE
            .checked_mul(add_ons)
            .and_then(|extra| extra.checked_add(self.size.base_price()))
            .ok_or(CustomDrinkError::Overflow)
    }

    /// The option bag stored on cart and order lines.
    #[must_use]
    pub fn to_options(&self) -> Map<String, Value> {
        let mut options = Map::new();

        options.insert(BASE_FLAVOR_KEY.to_string(), Value::from(self.base_flavor.name));
        options.insert(
            SECONDARY_FLAVOR_KEY.to_string(),
            self.secondary_flavor
                .map_or(Value::Null, |flavor| Value::from(flavor.name)),
        );
        options.insert(SIZE_KEY.to_string(), Value::from(self.size.as_str()));
        options.insert(
            ADD_ONS_KEY.to_string(),
            Value::Array(
                self.add_ons
                    .iter()
                    .map(|add_on| Value::from(add_on.name))
                    .collect(),
            ),
        );

        options
    }

    /// Rebuild a drink from a line's option bag so it can be priced
    /// server-side. Sweetness and ice level are not carried in the bag and
    /// come back as their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a key is missing, has the wrong shape, or names
    /// something the builder does not offer.
    pub fn from_options(name: &str, options: &Map<String, Value>) -> Result<Self, CustomDrinkError> {
        let base_flavor = match options.get(BASE_FLAVOR_KEY) {
            Some(Value::String(flavor)) if !flavor.trim().is_empty() => Flavor::find(flavor)?,
            Some(Value::String(_) | Value::Null) | None => {
                return Err(CustomDrinkError::MissingBaseFlavor);
            }
            Some(_) => return Err(malformed(BASE_FLAVOR_KEY)),
        };

        let secondary_flavor = match options.get(SECONDARY_FLAVOR_KEY) {
            Some(Value::String(flavor)) if !flavor.trim().is_empty() => Some(Flavor::find(flavor)?),
            Some(Value::String(_) | Value::Null) | None => None,
            Some(_) => return Err(malformed(SECONDARY_FLAVOR_KEY)),
        };

        let size = match options.get(SIZE_KEY) {
            Some(Value::String(size)) => size.parse()?,
            None | Some(Value::Null) => DrinkSize::default(),
            Some(_) => return Err(malformed(SIZE_KEY)),
        };

        let add_ons = match options.get(ADD_ONS_KEY) {
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| {
                    value
                        .as_str()
                        .ok_or_else(|| malformed(ADD_ONS_KEY))
                        .and_then(AddOn::find)
                })
                .collect::<Result<Vec<_>, _>>()?,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => return Err(malformed(ADD_ONS_KEY)),
        };

        Ok(Self {
            name: name.to_string(),
            base_flavor,
            secondary_flavor,
            size,
            add_ons,
            sweetness: DEFAULT_LEVEL,
            ice_level: DEFAULT_LEVEL,
        })
    }
}

fn malformed(key: &str) -> CustomDrinkError {
    CustomDrinkError::MalformedOptions(format!("{key} has an unexpected type"))
}
