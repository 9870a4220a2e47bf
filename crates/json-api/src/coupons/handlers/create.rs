//! Create Coupon Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::JsonBody,
    prelude::*,
};

use coupons_app::domain::coupons::data::NewCoupon;

use crate::{
    coupons::{
        errors::into_status_error,
        models::{CouponResponse, CreateCouponRequest},
    },
    extensions::*,
    state::State,
};

/// Create Coupon Handler
///
/// Creates a coupon against an existing store. Unknown category ids are
/// ignored.
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "coupons.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        coupon_uuid = tracing::field::Empty,
        store_uuid = tracing::field::Empty,
        categories_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let coupon = NewCoupon::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("coupon_uuid", tracing::field::display(coupon.uuid));
    span.record("store_uuid", tracing::field::display(coupon.store));
    span.record("categories_count", coupon.categories.len());

    let created = state
        .app
        .coupons
        .create_coupon(coupon)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/coupons/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(coupon_uuid = %created.uuid, "created coupon");

    Ok(Json(created.into()))
}
