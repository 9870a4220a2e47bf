//! Coupon Index Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use coupons_app::domain::coupons::data::CouponFilter;

use crate::{
    coupons::{errors::into_status_error, models::CouponListResponse},
    extensions::*,
    state::State,
};

/// Listing filters. Flags that are absent or `false` are not applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CouponsQuery {
    category_id: Option<Uuid>,
    store_id: Option<Uuid>,
    search: Option<String>,
    is_popular: Option<bool>,
    is_new: Option<bool>,
    is_expiring_soon: Option<bool>,
}

impl From<CouponsQuery> for CouponFilter {
    fn from(query: CouponsQuery) -> Self {
        CouponFilter {
            category: query.category_id.map(Into::into),
            store: query.store_id.map(Into::into),
            search: query.search,
            popular: query.is_popular.unwrap_or(false),
            new: query.is_new.unwrap_or(false),
            expiring_soon: query.is_expiring_soon.unwrap_or(false),
        }
    }
}

/// Coupon Index Handler
///
/// Returns coupons matching every supplied filter, newest first.
#[endpoint(
    tags("coupons"),
    summary = "List Coupons",
    parameters(
        ("categoryId" = Option<Uuid>, Query, description = "Only coupons in this category"),
        ("storeId" = Option<Uuid>, Query, description = "Only coupons from this store"),
        ("search" = Option<String>, Query, description = "Substring of title, description or store name"),
        ("isPopular" = Option<bool>, Query, description = "Only popular coupons when true"),
        ("isNew" = Option<bool>, Query, description = "Only new coupons when true"),
        ("isExpiringSoon" = Option<bool>, Query, description = "Only expiring-soon coupons when true"),
    ),
    responses(
        (status_code = StatusCode::OK, description = "Matching coupons"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed filter"),
    ),
)]
#[tracing::instrument(name = "coupons.index", skip(req, depot), err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CouponListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = req
        .parse_queries::<CouponsQuery>()
        .or_400("could not parse coupon filters")?;

    let coupons = state
        .app
        .coupons
        .list_coupons(query.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into()))
}
