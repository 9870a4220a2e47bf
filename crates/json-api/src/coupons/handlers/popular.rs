//! Popular Coupons Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    coupons::{
        errors::into_status_error,
        models::CouponsResponse,
    },
    extensions::*,
    state::State,
};

/// Popular Coupons Handler
///
/// Returns up to 12 popular coupons, most used first.
#[endpoint(tags("coupons"), summary = "List Popular Coupons")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .list_popular_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into()))
}
