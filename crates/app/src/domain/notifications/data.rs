//! Notification Data

use std::{fmt, str::FromStr};

use crate::domain::{
    UnknownValueError, coupons::records::CouponUuid, notifications::records::NotificationUuid,
    stores::records::StoreUuid, users::records::UserUuid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A saved coupon is about to expire.
    Expiry,

    /// A new deal matching the user's preferences.
    New,

    PriceAlert,
    System,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expiry => "expiry",
            Self::New => "new",
            Self::PriceAlert => "price_alert",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "expiry" => Ok(Self::Expiry),
            "new" => Ok(Self::New),
            "price_alert" => Ok(Self::PriceAlert),
            "system" => Ok(Self::System),
            _ => Err(UnknownValueError::new("notification type", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub uuid: NotificationUuid,
    pub user: UserUuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub coupon: Option<CouponUuid>,
    pub store: Option<StoreUuid>,
}
