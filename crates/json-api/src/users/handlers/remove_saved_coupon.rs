//! Remove Saved Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Remove Saved Coupon Handler
#[endpoint(
    tags("users"),
    summary = "Remove Saved Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon removed from saved"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon was not saved"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .users
        .remove_saved_coupon(user, coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
