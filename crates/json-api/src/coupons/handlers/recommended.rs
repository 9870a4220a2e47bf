//! Recommended Coupons Handler

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

/// Recommended Coupons Handler
///
/// Returns up to 12 new coupons, newest first.
#[endpoint(tags("coupons"), summary = "List Recommended Coupons")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .list_new_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into()))
}
