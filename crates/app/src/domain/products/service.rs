//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::Span;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductQuery},
        errors::ProductsServiceError,
        records::{Pagination, ProductDetail, ProductPage, ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    #[tracing::instrument(
        name = "products.service.list_products",
        skip(self, query),
        fields(page = query.page, limit = query.limit, total = tracing::field::Empty),
        err
    )]
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError> {
        let query = query.normalised();

        if let (Some(min), Some(max)) = (query.min_price, query.max_price)
            && min > max
        {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let total = self.repository.count_products(&mut tx, &query).await?;
        let products = self.repository.list_products(&mut tx, &query).await?;

        tx.commit().await?;

        Span::current().record("total", total);

        Ok(ProductPage {
            products,
            pagination: Pagination::new(query.page, query.limit, total),
        })
    }

    #[tracing::instrument(name = "products.service.get_product_by_slug", skip(self), err)]
    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductDetail, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        let related = self
            .repository
            .list_related_products(&mut tx, &product)
            .await?;

        tx.commit().await?;

        Ok(ProductDetail { product, related })
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, slug = %product.slug),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.slug.trim().is_empty() || product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of active products matching the query.
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve an active product by slug, with related products from its
    /// category.
    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductDetail, ProductsServiceError>;

    /// Retrieve a single product, active or not.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new catalog product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
