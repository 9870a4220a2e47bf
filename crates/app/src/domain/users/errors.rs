//! Users service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::auth::PasswordHashError;

pub(crate) const USERS_EMAIL_KEY: &str = "users_email_key";

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("email already registered")]
    EmailTaken,

    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("coupon not found")]
    CouponNotFound,

    #[error("saved coupon not found")]
    SavedCouponNotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("password hashing failed")]
    PasswordHash(#[from] PasswordHashError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(db_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match db_error.kind() {
            ErrorKind::UniqueViolation if db_error.constraint() == Some(USERS_EMAIL_KEY) => {
                Self::EmailTaken
            }
            ErrorKind::UniqueViolation => Self::AlreadyExists,
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            ErrorKind::NotNullViolation => Self::MissingRequiredData,
            ErrorKind::CheckViolation => Self::InvalidData,
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}
