//! Category Coupons Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::coupons::records::CategoryCoupons;

use crate::{
    categories::models::CategoryResponse,
    coupons::{
        errors::into_status_error,
        models::{CouponResponse, into_responses},
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryCouponsResponse {
    pub category: CategoryResponse,
    pub coupons: Vec<CouponResponse>,
}

impl From<CategoryCoupons> for CategoryCouponsResponse {
    fn from(category_coupons: CategoryCoupons) -> Self {
        CategoryCouponsResponse {
            category: category_coupons.category.into(),
            coupons: into_responses(category_coupons.coupons),
        }
    }
}

/// Category Coupons Handler
///
/// Returns a category and its coupons, newest first.
#[endpoint(
    tags("coupons"),
    summary = "List Category Coupons",
    responses(
        (status_code = StatusCode::OK, description = "Category coupons"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CategoryCouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category_coupons = state
        .app
        .coupons
        .list_category_coupons(category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category_coupons.into()))
}
