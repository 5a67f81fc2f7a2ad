//! Products Data

use std::str::FromStr;

use crate::domain::products::records::{ProductCategory, ProductUuid};

/// Default page size for catalog listings.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Upper bound on page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
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
    pub is_featured: bool,
}

/// Catalog sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    CreatedAt,
    Price,
    Name,
}

impl ProductSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price",
            Self::Name => "name",
        }
    }
}

impl FromStr for ProductSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort key {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order {other:?}")),
        }
    }
}

/// Catalog listing filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub limit: u32,
    pub category: Option<ProductCategory>,
    pub search: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub featured_only: bool,
    pub sort_by: ProductSort,
    pub sort_order: SortOrder,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            category: None,
            search: None,
            min_price: None,
            max_price: None,
            featured_only: false,
            sort_by: ProductSort::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ProductQuery {
    /// Clamp paging into range and drop blank search terms.
    #[must_use]
    pub fn normalised(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        self.search = self
            .search
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());

        self
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Search term as an `ILIKE` pattern with wildcards escaped.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);

            pattern.push('%');

            for ch in term.chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }

                pattern.push(ch);
            }

            pattern.push('%');
            pattern
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalised_clamps_paging() {
        let query = ProductQuery {
            page: 0,
            limit: 1_000,
            search: Some("   ".to_string()),
            ..ProductQuery::default()
        }
        .normalised();

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_PAGE_SIZE);
        assert_eq!(query.search, None, "blank search is dropped");
    }

    #[test]
    fn offset_skips_previous_pages() {
        let query = ProductQuery {
            page: 3,
            limit: 12,
            ..ProductQuery::default()
        };

        assert_eq!(query.offset(), 24);
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        let query = ProductQuery {
            search: Some("100%_berry".to_string()),
            ..ProductQuery::default()
        };

        assert_eq!(query.search_pattern().as_deref(), Some("%100\\%\\_berry%"));
    }

    #[test]
    fn sort_keys_accept_camel_case() {
        assert_eq!("createdAt".parse::<ProductSort>(), Ok(ProductSort::CreatedAt));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("rating".parse::<ProductSort>().is_err(), "unsupported key");
    }
}
