//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Smoothies,
    Juices,
    Teas,
    Coffee,
    EnergyDrinks,
    Custom,
}

#[derive(Debug, Error)]
#[error("unknown product category {0:?}")]
pub struct UnknownCategory(pub String);

impl ProductCategory {
    pub const ALL: [Self; 6] = [
        Self::Smoothies,
        Self::Juices,
        Self::Teas,
        Self::Coffee,
        Self::EnergyDrinks,
        Self::Custom,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smoothies => "SMOOTHIES",
            Self::Juices => "JUICES",
            Self::Teas => "TEAS",
            Self::Coffee => "COFFEE",
            Self::EnergyDrinks => "ENERGY_DRINKS",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub short_description: Option<String>,
    pub sku: Option<String>,
    pub price: u64,
    pub compare_price: Option<u64>,
    pub inventory: u64,
    pub category: ProductCategory,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whether `quantity` units can currently be sold.
    #[must_use]
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.inventory >= u64::from(quantity)
    }
}

/// A product together with other active products from its category.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: ProductRecord,
    pub related: Vec<ProductRecord>,
}

/// Page bookkeeping for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_total_pages_up() {
        let pagination = Pagination::new(1, 12, 25);

        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_next, "page 1 of 3 has a next page");
        assert!(!pagination.has_prev, "page 1 has no previous page");
    }

    #[test]
    fn pagination_last_page() {
        let pagination = Pagination::new(3, 12, 25);

        assert!(!pagination.has_next, "last page has no next page");
        assert!(pagination.has_prev, "page 3 has a previous page");
    }

    #[test]
    fn pagination_empty_catalog() {
        let pagination = Pagination::new(1, 12, 0);

        assert_eq!(pagination.total_pages, 0);
        assert!(!pagination.has_next, "empty catalog has no next page");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            "energy_drinks".parse::<ProductCategory>().ok(),
            Some(ProductCategory::EnergyDrinks)
        );
        assert!("SODA".parse::<ProductCategory>().is_err(), "unknown category");
    }
}
