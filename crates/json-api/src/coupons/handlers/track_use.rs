//! Track Coupon Use Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    coupons::{errors::into_status_error, models::CouponUsageResponse},
    extensions::*,
    observability::record_coupon_use,
    state::State,
};

/// Track Coupon Use Handler
///
/// Counts one redemption. Coupons become popular once used more than 50 times.
#[endpoint(
    tags("coupons"),
    summary = "Track Coupon Use",
    responses(
        (status_code = StatusCode::OK, description = "Use recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CouponUsageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let usage = state
        .app
        .coupons
        .track_use(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_coupon_use();

    Ok(Json(usage.into()))
}
