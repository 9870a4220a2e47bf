//! Coupon Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    coupons::{errors::into_status_error, models::CouponListResponse},
    extensions::*,
    state::State,
};

/// Coupon Search Handler
///
/// Substring search over coupon titles and descriptions, newest first.
#[endpoint(
    tags("coupons"),
    summary = "Search Coupons",
    responses(
        (status_code = StatusCode::OK, description = "Matching coupons"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing query"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<CouponListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .search_coupons(q.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into()))
}
