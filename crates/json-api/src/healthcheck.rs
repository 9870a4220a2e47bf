//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `unavailable` when the database cannot be reached
    pub status: String,
}

/// Healthcheck handler
///
/// Reports whether the database answers.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service is healthy"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = match state.app.health.ping().await {
        Ok(()) => "ok",
        Err(source) => {
            error!("healthcheck database ping failed: {source}");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            "unavailable"
        }
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
    }))
}
