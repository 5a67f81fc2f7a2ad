//! Current Customer Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use halfdrinks_app::auth::{AuthServiceError, CustomerProfile};

use crate::{extensions::*, state::State};

/// Signed-in customer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerResponse {
    pub uuid: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Current loyalty point balance
    pub loyalty_points: i64,
}

impl From<CustomerProfile> for CustomerResponse {
    fn from(profile: CustomerProfile) -> Self {
        Self {
            uuid: profile.customer.uuid.into(),
            email: profile.customer.email,
            first_name: profile.customer.first_name,
            last_name: profile.customer.last_name,
            loyalty_points: profile.loyalty_points,
        }
    }
}

/// Current Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MeResponse {
    pub user: Option<CustomerResponse>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MeResponse {
    fn anonymous() -> Self {
        Self {
            user: None,
            message: Some("No user logged in".to_string()),
        }
    }
}

/// Current Customer Handler
///
/// Returns the customer behind the bearer token, or `user: null`.
#[endpoint(tags("auth"), summary = "Current Customer", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(customer) = depot.customer_uuid() else {
        return Ok(Json(MeResponse::anonymous()));
    };

    match state.app.auth.get_customer(customer).await {
        Ok(profile) => Ok(Json(MeResponse {
            user: Some(profile.into()),
            message: None,
        })),
        Err(AuthServiceError::NotFound) => Ok(Json(MeResponse::anonymous())),
        Err(source) => {
            error!("failed to load current customer: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}
