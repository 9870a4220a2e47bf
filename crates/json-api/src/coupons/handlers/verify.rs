//! Verify Coupon Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerificationResponse {
    pub is_valid: bool,
}

/// Verify Coupon Handler
///
/// No store integration exists, so every coupon verifies as valid.
#[endpoint(
    tags("coupons"),
    summary = "Verify Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Verification result"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<VerificationResponse>, StatusError> {
    let user = depot.user_uuid_or_401()?;

    tracing::debug!(coupon_uuid = %coupon.into_inner(), user_uuid = %user, "verified coupon");

    Ok(Json(VerificationResponse { is_valid: true }))
}
