//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use halfdrinks_app::auth::CustomerUuid;

const CUSTOMER_UUID_DEPOT_KEY: &str = "customer_uuid";

/// Helpers for shared state and the optional signed-in customer.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_customer_uuid(&mut self, customer: CustomerUuid);

    /// The customer identified for this request, if any. Requests without a
    /// valid bearer token are anonymous.
    fn customer_uuid(&self) -> Option<CustomerUuid>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_customer_uuid(&mut self, customer: CustomerUuid) {
        self.insert(CUSTOMER_UUID_DEPOT_KEY, customer);
    }

    fn customer_uuid(&self) -> Option<CustomerUuid> {
        self.get::<CustomerUuid>(CUSTOMER_UUID_DEPOT_KEY).ok().copied()
    }
}
