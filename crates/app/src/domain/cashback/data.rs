//! Cashback Data

use std::{fmt, str::FromStr};

use crate::domain::{
    UnknownValueError, cashback::records::CashbackTransactionUuid, coupons::records::CouponUuid,
    stores::records::StoreUuid, users::records::UserUuid,
};

/// Lifecycle of a cashback transaction.
///
/// `pending` moves to `approved` or `rejected`; only `approved` can be
/// `paid`. `rejected` and `paid` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashbackStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

impl CashbackStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
        }
    }

    /// Apply `transition`, or `None` when it is not allowed from this status.
    #[must_use]
    pub const fn apply(self, transition: CashbackTransition) -> Option<Self> {
        match (self, transition) {
            (Self::Pending, CashbackTransition::Approve) => Some(Self::Approved),
            (Self::Pending, CashbackTransition::Reject) => Some(Self::Rejected),
            (Self::Approved, CashbackTransition::Pay) => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for CashbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CashbackStatus {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "paid" => Ok(Self::Paid),
            _ => Err(UnknownValueError::new("cashback status", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashbackTransition {
    Approve,
    Reject,

    /// Also stamps the payout date.
    Pay,
}

impl fmt::Display for CashbackTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Pay => "pay",
        })
    }
}

/// A new transaction, always recorded as `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCashbackTransaction {
    pub uuid: CashbackTransactionUuid,
    pub user: UserUuid,
    pub coupon: CouponUuid,
    pub store: StoreUuid,

    /// Minor currency units.
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSITIONS: [CashbackTransition; 3] = [
        CashbackTransition::Approve,
        CashbackTransition::Reject,
        CashbackTransition::Pay,
    ];

    #[test]
    fn allowed_transitions() {
        assert_eq!(
            CashbackStatus::Pending.apply(CashbackTransition::Approve),
            Some(CashbackStatus::Approved)
        );
        assert_eq!(
            CashbackStatus::Pending.apply(CashbackTransition::Reject),
            Some(CashbackStatus::Rejected)
        );
        assert_eq!(
            CashbackStatus::Approved.apply(CashbackTransition::Pay),
            Some(CashbackStatus::Paid)
        );
    }

    #[test]
    fn pending_cannot_be_paid_directly() {
        assert_eq!(CashbackStatus::Pending.apply(CashbackTransition::Pay), None);
    }

    #[test]
    fn final_statuses_do_not_move() {
        for transition in TRANSITIONS {
            assert_eq!(CashbackStatus::Rejected.apply(transition), None);
            assert_eq!(CashbackStatus::Paid.apply(transition), None);
        }
    }

    #[test]
    fn approved_can_only_be_paid() {
        assert_eq!(CashbackStatus::Approved.apply(CashbackTransition::Approve), None);
        assert_eq!(CashbackStatus::Approved.apply(CashbackTransition::Reject), None);
    }
}
