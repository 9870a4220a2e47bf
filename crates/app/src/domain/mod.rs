//! Coupon Marketplace Domain Concerns

use thiserror::Error;

pub mod cashback;
pub mod categories;
pub mod coupons;
pub mod notifications;
pub mod stores;
pub mod users;

/// Raised when a stored or submitted label matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
