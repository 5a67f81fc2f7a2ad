//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use halfdrinks_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData
        | ProductsServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief("Invalid product query")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("failed to load products: {source}");

            StatusError::internal_server_error()
        }
    }
}
