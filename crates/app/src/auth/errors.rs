//! Auth service errors.

use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

use crate::{
    auth::{PasswordHashError, SocialLoginError},
    domain::users::errors::USERS_EMAIL_KEY,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown email, wrong password, or a missing, revoked or expired session.
    #[error("unauthorized")]
    Unauthorized,

    #[error("email already registered")]
    EmailTaken,

    #[error("user already exists")]
    AlreadyExists,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("social login failed")]
    SocialLogin(#[from] SocialLoginError),

    #[error("password hashing failed")]
    PasswordHash(#[from] PasswordHashError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::Unauthorized;
        }

        let Some(db_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match db_error.kind() {
            ErrorKind::UniqueViolation if db_error.constraint() == Some(USERS_EMAIL_KEY) => {
                Self::EmailTaken
            }
            ErrorKind::UniqueViolation => Self::AlreadyExists,
            ErrorKind::ForeignKeyViolation => Self::Unauthorized,
            ErrorKind::NotNullViolation => Self::MissingRequiredData,
            ErrorKind::CheckViolation => Self::InvalidData,
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}
