//! Popular Stores Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoresResponse},
};

/// Popular Stores Handler
///
/// Returns stores flagged popular, largest catalogue first.
#[endpoint(tags("stores"), summary = "List Popular Stores")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StoresResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stores = state
        .app
        .stores
        .list_popular_stores()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stores.into()))
}
