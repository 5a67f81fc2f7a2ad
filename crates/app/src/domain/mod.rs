//! Storefront domain concerns.

pub mod carts;
pub mod checkout;
pub mod custom_drinks;
pub mod loyalty;
pub mod newsletter;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod settlement;
