//! Flavors, add-ons and sizes offered by the drink builder.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::custom_drinks::errors::CustomDrinkError;

/// Extra charge per selected add-on, in cents.
pub const ADD_ON_PRICE: u64 = 50;

/// Starting sweetness and ice level, on a 0-100 scale.
pub const DEFAULT_LEVEL: u8 = 50;

/// Colour used when a flavor has not been picked yet.
pub const UNSELECTED_COLOR: &str = "#CCCCCC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Flavor {
    pub name: &'static str,
    pub color: &'static str,
}

impl Flavor {
    pub const ALL: [Self; 10] = [
        Self::new("Strawberry", "#FF6B81"),
        Self::new("Mango", "#FFC300"),
        Self::new("Blueberry", "#4A4A9F"),
        Self::new("Vanilla", "#F3E5AB"),
        Self::new("Chocolate", "#7B3F00"),
        Self::new("Spinach", "#4CAF50"),
        Self::new("Kale", "#3D7E3D"),
        Self::new("Pineapple", "#FFD700"),
        Self::new("Coconut", "#E0E0E0"),
        Self::new("Coffee", "#6F4E37"),
    ];

    const fn new(name: &'static str, color: &'static str) -> Self {
        Self { name, color }
    }

    /// Look up a flavor by its display name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`CustomDrinkError::UnknownFlavor`] when no flavor matches.
    pub fn find(name: &str) -> Result<Self, CustomDrinkError> {
        Self::ALL
            .into_iter()
            .find(|flavor| flavor.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CustomDrinkError::UnknownFlavor(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AddOn {
    pub name: &'static str,
}

impl AddOn {
    pub const ALL: [Self; 7] = [
        Self::new("Protein Powder"),
        Self::new("Flax Seeds"),
        Self::new("Spirulina"),
        Self::new("Cacao Powder"),
        Self::new("Chia Seeds"),
        Self::new("Hemp Hearts"),
        Self::new("Matcha Powder"),
    ];

    const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// # Errors
    ///
    /// Returns [`CustomDrinkError::UnknownAddOn`] when no add-on matches.
    pub fn find(name: &str) -> Result<Self, CustomDrinkError> {
        Self::ALL
            .into_iter()
            .find(|add_on| add_on.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CustomDrinkError::UnknownAddOn(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl DrinkSize {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub const fn base_price(self) -> u64 {
        match self {
            Self::Small => 499,
            Self::Medium => 699,
            Self::Large => 899,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for DrinkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrinkSize {
    type Err = CustomDrinkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| CustomDrinkError::UnknownSize(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn flavor_lookup_ignores_case() -> TestResult {
        let flavor = Flavor::find("mango")?;

        assert_eq!(flavor.name, "Mango");
        assert_eq!(flavor.color, "#FFC300");

        Ok(())
    }

    #[test]
    fn unknown_flavor_is_rejected() {
        let result = Flavor::find("Durian");

        assert_eq!(result, Err(CustomDrinkError::UnknownFlavor("Durian".to_string())));
    }

    #[test]
    fn size_base_prices() {
        assert_eq!(DrinkSize::Small.base_price(), 499);
        assert_eq!(DrinkSize::Medium.base_price(), 699);
        assert_eq!(DrinkSize::Large.base_price(), 899);
        assert_eq!(DrinkSize::default(), DrinkSize::Medium);
    }

    #[test]
    fn size_parses_from_lowercase_names() -> TestResult {
        assert_eq!("LARGE".parse::<DrinkSize>()?, DrinkSize::Large);
        assert!("venti".parse::<DrinkSize>().is_err(), "unknown sizes fail");

        Ok(())
    }
}
