//! Newsletter Subscribe Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use halfdrinks_app::domain::newsletter::NewsletterError;

use crate::{extensions::*, state::State};

/// Subscribe Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscribeRequest {
    pub email: String,
}

/// Subscribe Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

/// Newsletter Subscribe Handler
///
/// Subscribing an address that is already on the list succeeds.
#[endpoint(
    tags("newsletter"),
    summary = "Subscribe to Newsletter",
    responses(
        (status_code = StatusCode::OK, description = "Subscribed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email address"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SubscribeRequest>,
    depot: &mut Depot,
) -> Result<Json<SubscribeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.newsletter.subscribe(&json.into_inner().email).await {
        Ok(added) => Ok(Json(SubscribeResponse {
            success: true,
            message: if added {
                "Successfully subscribed to newsletter".to_string()
            } else {
                "Already subscribed".to_string()
            },
        })),
        Err(NewsletterError::InvalidEmail) => {
            Err(StatusError::bad_request().brief("Invalid email address"))
        }
        Err(NewsletterError::Sql(source)) => {
            error!("failed to subscribe to newsletter: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}
