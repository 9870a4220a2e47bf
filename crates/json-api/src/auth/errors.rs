//! Auth Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use coupons_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::Unauthorized => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::EmailTaken => StatusError::conflict().brief("Email already registered"),
        AuthServiceError::AlreadyExists => StatusError::conflict().brief("Account already exists"),
        AuthServiceError::MissingRequiredData | AuthServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account payload")
        }
        AuthServiceError::SocialLogin(source) => {
            warn!("social login rejected: {source}");

            StatusError::unauthorized().brief("Social login rejected")
        }
        AuthServiceError::PasswordHash(source) => {
            error!("password hashing failure: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
