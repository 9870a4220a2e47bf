//! Store Coupons Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::coupons::records::StoreCoupons;

use crate::{
    coupons::{
        errors::into_status_error,
        models::{CouponResponse, into_responses},
    },
    extensions::*,
    state::State,
    stores::models::StoreResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreCouponsResponse {
    pub store: StoreResponse,
    pub coupons: Vec<CouponResponse>,
}

impl From<StoreCoupons> for StoreCouponsResponse {
    fn from(store_coupons: StoreCoupons) -> Self {
        StoreCouponsResponse {
            store: store_coupons.store.into(),
            coupons: into_responses(store_coupons.coupons),
        }
    }
}

/// Store Coupons Handler
///
/// Returns a store and its coupons, newest first.
#[endpoint(
    tags("coupons"),
    summary = "List Store Coupons",
    responses(
        (status_code = StatusCode::OK, description = "Store coupons"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<StoreCouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let store_coupons = state
        .app
        .coupons
        .list_store_coupons(store.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(store_coupons.into()))
}
