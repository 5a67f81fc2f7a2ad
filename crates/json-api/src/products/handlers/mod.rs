//! Product Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use halfdrinks_app::domain::products::records::ProductRecord;

pub(crate) mod get;
pub(crate) mod index;

/// Catalog product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub short_description: Option<String>,
    pub sku: Option<String>,

    /// Unit price in cents
    pub price: u64,

    /// Previous price in cents, shown struck through
    pub compare_price: Option<u64>,

    /// Units in stock
    pub inventory: u64,

    /// Category, e.g. `SMOOTHIES`
    pub category: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            slug: product.slug,
            name: product.name,
            description: product.description,
            short_description: product.short_description,
            sku: product.sku,
            price: product.price,
            compare_price: product.compare_price,
            inventory: product.inventory,
            category: product.category.as_str().to_string(),
            tags: product.tags,
            ingredients: product.ingredients,
            is_featured: product.is_featured,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
pub(super) mod tests {
    use jiff::Timestamp;

    use halfdrinks_app::domain::products::records::{ProductCategory, ProductRecord, ProductUuid};

    pub(crate) fn make_product(uuid: ProductUuid, slug: &str, price: u64) -> ProductRecord {
        ProductRecord {
            uuid,
            slug: slug.to_string(),
            name: slug.replace('-', " "),
            description: "Blended to order".to_string(),
            short_description: None,
            sku: None,
            price,
            compare_price: None,
            inventory: 25,
            category: ProductCategory::Smoothies,
            tags: vec!["fruity".to_string()],
            ingredients: vec!["banana".to_string()],
            is_active: true,
            is_featured: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
