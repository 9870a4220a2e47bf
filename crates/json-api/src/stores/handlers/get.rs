//! Get Store Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoreResponse},
};

/// Get Store Handler
///
/// Returns a store with its categories.
#[endpoint(
    tags("stores"),
    summary = "Get Store",
    responses(
        (status_code = StatusCode::OK, description = "Store found"),
        (status_code = StatusCode::NOT_FOUND, description = "Store not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed store id"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let store = state
        .app
        .stores
        .get_store(store.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(store.into()))
}
