//! Get Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    categories::{errors::into_status_error, models::CategoryResponse},
    extensions::*,
    state::State,
};

/// Get Category Handler
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed category id"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
