//! Errors

use salvo::http::StatusError;
use tracing::error;

use halfdrinks_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::ItemNotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InsufficientInventory { available } => StatusError::bad_request()
            .brief("Insufficient inventory")
            .detail(format!("Only {available} left in stock")),
        CartsServiceError::InvalidItem(reason) => StatusError::bad_request()
            .brief("Invalid cart item")
            .detail(reason),
        CartsServiceError::CustomDrink(source) => StatusError::bad_request()
            .brief("Invalid custom drink")
            .detail(source.to_string()),
        error @ (CartsServiceError::Pricing(_)
        | CartsServiceError::Products(_)
        | CartsServiceError::Sql(_)
        | CartsServiceError::Serialization(_)) => {
            error!("cart operation failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use halfdrinks_app::domain::custom_drinks::CustomDrinkError;

    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        let cases = [
            (CartsServiceError::ProductNotFound, StatusCode::NOT_FOUND),
            (CartsServiceError::ItemNotFound, StatusCode::NOT_FOUND),
            (
                CartsServiceError::InsufficientInventory { available: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (
                CartsServiceError::InvalidItem("quantity must be at least 1".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CartsServiceError::CustomDrink(CustomDrinkError::MissingBaseFlavor),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            let label = format!("{error:?}");

            assert_eq!(into_status_error(error).code, expected, "for {label}");
        }
    }

    #[test]
    fn storage_errors_map_to_500() {
        let status = into_status_error(CartsServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
