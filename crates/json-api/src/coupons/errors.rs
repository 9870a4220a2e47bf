//! Coupon Errors

use salvo::http::StatusError;
use tracing::error;

use coupons_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::StoreNotFound => StatusError::not_found().brief("Store not found"),
        CouponsServiceError::CategoryNotFound => {
            StatusError::not_found().brief("Category not found")
        }
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon already exists")
        }
        CouponsServiceError::InvalidReference => {
            StatusError::conflict().brief("Coupon is referenced by other records")
        }
        CouponsServiceError::MissingRequiredData | CouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid coupon payload")
        }
        CouponsServiceError::Sql(source) => {
            error!("coupon storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
