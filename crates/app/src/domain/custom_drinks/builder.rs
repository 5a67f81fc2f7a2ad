//! Custom drink wizard state.

use serde::Serialize;

use crate::domain::{
    carts::models::{LineItemTarget, NewCartItem},
    custom_drinks::{
        catalog::{AddOn, DEFAULT_LEVEL, DrinkSize, Flavor, UNSELECTED_COLOR},
        drink::{CustomDrink, CustomDrinkUuid},
        errors::CustomDrinkError,
    },
};

/// Name used when the customer leaves the name blank.
pub const DEFAULT_DRINK_NAME: &str = "My Custom Drink";

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Details,
    AddOns,
    Review,
}

impl WizardStep {
    /// The following step, staying on the last one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Details => Self::AddOns,
            Self::AddOns | Self::Review => Self::Review,
        }
    }

    /// The preceding step, staying on the first one.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Details | Self::AddOns => Self::Details,
            Self::Review => Self::AddOns,
        }
    }

    /// One-based position, as shown in the progress indicator.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::AddOns => 2,
            Self::Review => 3,
        }
    }
}

/// Base and secondary colours used to render the drink preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub base: &'static str,
    pub secondary: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDrinkBuilder {
    step: WizardStep,
    name: String,
    base_flavor: Option<Flavor>,
    secondary_flavor: Option<Flavor>,
    size: DrinkSize,
    add_ons: Vec<AddOn>,
    sweetness: u8,
    ice_level: u8,
}

impl Default for CustomDrinkBuilder {
    fn default() -> Self {
        Self {
            step: WizardStep::default(),
            name: DEFAULT_DRINK_NAME.to_string(),
            base_flavor: None,
            secondary_flavor: None,
            size: DrinkSize::default(),
            add_ons: Vec::new(),
            sweetness: DEFAULT_LEVEL,
            ice_level: DEFAULT_LEVEL,
        }
    }
}

impl CustomDrinkBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    pub fn next(&mut self) -> WizardStep {
        self.step = self.step.next();
        self.step
    }

    pub fn previous(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    pub fn set_name(&mut self, name: &str) {
        name.trim().clone_into(&mut self.name);
    }

    /// # Errors
    ///
    /// Returns [`CustomDrinkError::UnknownFlavor`] for a flavor not on offer.
    pub fn set_base_flavor(&mut self, flavor: &str) -> Result<(), CustomDrinkError> {
        self.base_flavor = Some(Flavor::find(flavor)?);

        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CustomDrinkError::UnknownFlavor`] for a flavor not on offer.
    pub fn set_secondary_flavor(&mut self, flavor: Option<&str>) -> Result<(), CustomDrinkError> {
        self.secondary_flavor = flavor.map(Flavor::find).transpose()?;

        Ok(())
    }

    pub fn set_size(&mut self, size: DrinkSize) {
        self.size = size;
    }

    /// # Errors
    ///
    /// Returns [`CustomDrinkError::LevelOutOfRange`] above 100.
    pub fn set_sweetness(&mut self, level: u8) -> Result<(), CustomDrinkError> {
        self.sweetness = checked_level(level, "sweetness")?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CustomDrinkError::LevelOutOfRange`] above 100.
    pub fn set_ice_level(&mut self, level: u8) -> Result<(), CustomDrinkError> {
        self.ice_level = checked_level(level, "ice level")?;

        Ok(())
    }

    /// Select the add-on if it is not selected, deselect it otherwise.
    /// Returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`CustomDrinkError::UnknownAddOn`] for an add-on not on offer.
    pub fn toggle_add_on(&mut self, add_on: &str) -> Result<bool, CustomDrinkError> {
        let add_on = AddOn::find(add_on)?;

        if let Some(position) = self.add_ons.iter().position(|selected| *selected == add_on) {
            self.add_ons.remove(position);

            return Ok(false);
        }

        self.add_ons.push(add_on);

        Ok(true)
    }

    #[must_use]
    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    /// Preview colours; unpicked flavors render grey.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette {
            base: self.base_flavor.map_or(UNSELECTED_COLOR, |flavor| flavor.color),
            secondary: self
                .secondary_flavor
                .map_or(UNSELECTED_COLOR, |flavor| flavor.color),
        }
    }

    /// Running price for the current selections.
    ///
    /// # Errors
    ///
    /// Returns [`CustomDrinkError::Overflow`] if the sum does not fit.
    pub fn price(&self) -> Result<u64, CustomDrinkError> {
        self.preview().price()
    }

    /// Finish the wizard.
    ///
    /// # Errors
    ///
    /// Returns [`CustomDrinkError::MissingBaseFlavor`] when no base flavor
    /// has been picked.
    pub fn build(&self) -> Result<CustomDrink, CustomDrinkError> {
        if self.base_flavor.is_none() {
            return Err(CustomDrinkError::MissingBaseFlavor);
        }

        Ok(self.preview())
    }

    /// Package the drink as a single cart line with a freshly minted uuid.
    ///
    /// # Errors
    ///
    /// Returns an error when the drink cannot be built or priced.
    pub fn into_cart_item(self) -> Result<NewCartItem, CustomDrinkError> {
        let drink = self.build()?;

        Ok(NewCartItem {
            target: LineItemTarget::CustomDrink(CustomDrinkUuid::new()),
            unit_price: drink.price()?,
            options: drink.to_options(),
            name: drink.name,
            quantity: 1,
        })
    }

    fn preview(&self) -> CustomDrink {
        let name = if self.name.is_empty() {
            DEFAULT_DRINK_NAME.to_string()
        } else {
            self.name.clone()
        };

        CustomDrink {
            name,
            base_flavor: self.base_flavor.unwrap_or(Flavor::ALL[0]),
            secondary_flavor: self.secondary_flavor,
            size: self.size,
            add_ons: self.add_ons.clone(),
            sweetness: self.sweetness,
            ice_level: self.ice_level,
        }
    }
}

fn checked_level(level: u8, field: &'static str) -> Result<u8, CustomDrinkError> {
    if level > 100 {
        return Err(CustomDrinkError::LevelOutOfRange { field });
    }

    Ok(level)
}
