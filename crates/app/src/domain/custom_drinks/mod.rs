//! Custom Drinks
//!
//! A custom drink is a two-flavour blend in one of three sizes with optional
//! add-ons. It never has a catalog row; it travels through carts and orders
//! as an option bag and is re-priced from that bag at checkout.

pub mod builder;
pub mod catalog;
pub mod drink;
pub mod errors;

pub use builder::{CustomDrinkBuilder, WizardStep};
pub use catalog::{ADD_ON_PRICE, AddOn, DEFAULT_LEVEL, DrinkSize, Flavor};
pub use drink::{CustomDrink, CustomDrinkUuid};
pub use errors::CustomDrinkError;
