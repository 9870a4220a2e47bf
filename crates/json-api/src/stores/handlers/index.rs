//! Store Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoresResponse},
};

/// Store Index Handler
///
/// Returns every store ordered by name.
#[endpoint(tags("stores"), summary = "List Stores")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StoresResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stores = state
        .app
        .stores
        .list_stores()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stores.into()))
}
