//! Expiring Soon Coupons Handler

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

/// Expiring Soon Coupons Handler
///
/// Returns up to 12 coupons flagged as expiring soon, soonest first. The flag
/// is as fresh as the last refresh run.
#[endpoint(tags("coupons"), summary = "List Expiring Soon Coupons")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .list_expiring_soon_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into()))
}
