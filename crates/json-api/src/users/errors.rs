//! User Errors

use salvo::http::StatusError;
use tracing::error;

use coupons_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::CouponNotFound => StatusError::not_found().brief("Coupon not found"),
        UsersServiceError::SavedCouponNotFound => {
            StatusError::not_found().brief("Saved coupon not found")
        }
        UsersServiceError::EmailTaken => StatusError::conflict().brief("Email already registered"),
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid profile payload")
        }
        UsersServiceError::PasswordHash(source) => {
            error!("password hashing failure: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
