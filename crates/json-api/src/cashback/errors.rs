//! Cashback Errors

use salvo::http::StatusError;
use tracing::error;

use coupons_app::domain::cashback::CashbackServiceError;

pub(crate) fn into_status_error(error: CashbackServiceError) -> StatusError {
    match error {
        CashbackServiceError::NotFound => {
            StatusError::not_found().brief("Cashback transaction not found")
        }
        CashbackServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cashback transaction already exists")
        }
        CashbackServiceError::InvalidTransition {
            current,
            transition,
        } => StatusError::conflict().brief(format!("Cannot {transition} a {current} transaction")),
        CashbackServiceError::InvalidReference
        | CashbackServiceError::MissingRequiredData
        | CashbackServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cashback payload")
        }
        CashbackServiceError::Sql(source) => {
            error!("cashback storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
