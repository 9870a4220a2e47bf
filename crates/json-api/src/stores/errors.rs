//! Store Errors

use salvo::http::StatusError;
use tracing::error;

use coupons_app::domain::stores::StoresServiceError;

pub(crate) fn into_status_error(error: StoresServiceError) -> StatusError {
    match error {
        StoresServiceError::NotFound => StatusError::not_found().brief("Store not found"),
        StoresServiceError::AlreadyExists => StatusError::conflict().brief("Store already exists"),
        StoresServiceError::InvalidReference
        | StoresServiceError::MissingRequiredData
        | StoresServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid store payload")
        }
        StoresServiceError::Sql(source) => {
            error!("store storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
