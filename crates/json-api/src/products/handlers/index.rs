//! Product Index Handler

use std::{str::FromStr, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use halfdrinks_app::domain::products::{
    data::{ProductQuery, ProductSort, SortOrder},
    records::{Pagination, ProductCategory},
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total: pagination.total,
            total_pages: pagination.total_pages,
            has_next: pagination.has_next,
            has_prev: pagination.has_prev,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The products on this page
    pub products: Vec<ProductResponse>,

    pub pagination: PaginationResponse,
}

/// Read an optional query parameter, treating blank values as absent.
fn param<T>(req: &Request, key: &str) -> Result<Option<T>, StatusError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = req.query::<String>(key) else {
        return Ok(None);
    };

    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<T>()
        .map(Some)
        .or_400(&format!("invalid {key} parameter"))
}

fn product_query(req: &Request) -> Result<ProductQuery, StatusError> {
    let defaults = ProductQuery::default();

    Ok(ProductQuery {
        page: param(req, "page")?.unwrap_or(defaults.page),
        limit: param(req, "limit")?.unwrap_or(defaults.limit),
        category: param::<ProductCategory>(req, "category")?,
        search: param(req, "search")?,
        min_price: param(req, "minPrice")?,
        max_price: param(req, "maxPrice")?,
        featured_only: param(req, "featured")?.unwrap_or(false),
        sort_by: param::<ProductSort>(req, "sortBy")?.unwrap_or_default(),
        sort_order: param::<SortOrder>(req, "sortOrder")?.unwrap_or_default(),
    }
    .normalised())
}

/// Product Index Handler
///
/// Returns a page of active catalog products. Prices are in cents.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "A page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid query parameter"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = product_query(req)?;

    let page = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: page.products.into_iter().map(Into::into).collect(),
        pagination: page.pagination.into(),
    }))
}
