//! User Records

use jiff::Timestamp;

use crate::{
    domain::{categories::records::CategoryUuid, stores::records::StoreUuid},
    uuids::TypedUuid,
};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Which kinds of notification a user wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub expiry: bool,
    pub new_deals: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            expiry: true,
            new_deals: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub categories: Vec<CategoryUuid>,
    pub stores: Vec<StoreUuid>,
    pub notifications: NotificationPreferences,
}

/// User Record
///
/// The password hash is never part of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub preferences: UserPreferences,
    pub points_balance: u64,
    pub referral_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored credentials for password login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) uuid: UserUuid,
    pub(crate) password_hash: String,
}
