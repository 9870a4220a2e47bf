//! User Data

use crate::domain::{
    categories::records::CategoryUuid, stores::records::StoreUuid, users::records::UserUuid,
};

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub referral_code: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationPreferencesUpdate {
    pub email: Option<bool>,
    pub push: Option<bool>,
    pub expiry: Option<bool>,
    pub new_deals: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub categories: Option<Vec<CategoryUuid>>,
    pub stores: Option<Vec<StoreUuid>>,
    pub notifications: NotificationPreferencesUpdate,
}

/// Partial profile update. Absent fields keep their stored value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub name: Option<String>,

    /// Plain text; hashed before it is stored.
    pub password: Option<String>,

    pub avatar: Option<String>,
    pub preferences: PreferencesUpdate,
}

impl std::fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserUpdate")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .field("avatar", &self.avatar)
            .field("preferences", &self.preferences)
            .finish()
    }
}
