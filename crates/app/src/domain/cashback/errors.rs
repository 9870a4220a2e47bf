//! Cashback service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::cashback::data::{CashbackStatus, CashbackTransition};

#[derive(Debug, Error)]
pub enum CashbackServiceError {
    #[error("cashback transaction already exists")]
    AlreadyExists,

    #[error("cashback transaction not found")]
    NotFound,

    #[error("cannot {transition} a {current} cashback transaction")]
    InvalidTransition {
        current: CashbackStatus,
        transition: CashbackTransition,
    },

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CashbackServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
