//! User Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use coupons_app::domain::users::{
    data::{NotificationPreferencesUpdate, PreferencesUpdate, UserUpdate},
    records::{NotificationPreferences, UserRecord},
};

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotificationPreferencesResponse {
    pub email: bool,
    pub push: bool,
    pub expiry: bool,
    pub new_deals: bool,
}

impl From<NotificationPreferences> for NotificationPreferencesResponse {
    fn from(preferences: NotificationPreferences) -> Self {
        NotificationPreferencesResponse {
            email: preferences.email,
            push: preferences.push,
            expiry: preferences.expiry,
            new_deals: preferences.new_deals,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PreferencesResponse {
    /// Preferred category ids
    pub categories: Vec<Uuid>,

    /// Preferred store ids
    pub stores: Vec<Uuid>,

    pub notifications: NotificationPreferencesResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub preferences: PreferencesResponse,
    pub points_balance: u64,
    pub referral_code: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.uuid.into(),
            email: user.email,
            name: user.name,
            avatar: user.avatar,
            preferences: PreferencesResponse {
                categories: user
                    .preferences
                    .categories
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                stores: user.preferences.stores.into_iter().map(Into::into).collect(),
                notifications: user.preferences.notifications.into(),
            },
            points_balance: user.points_balance,
            referral_code: user.referral_code,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotificationPreferencesPayload {
    pub email: Option<bool>,
    pub push: Option<bool>,
    pub expiry: Option<bool>,
    pub new_deals: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PreferencesPayload {
    /// Replaces the preferred categories when present
    pub categories: Option<Vec<Uuid>>,

    /// Replaces the preferred stores when present
    pub stores: Option<Vec<Uuid>>,

    #[serde(default)]
    pub notifications: NotificationPreferencesPayload,
}

/// Update Profile Request
///
/// Absent fields keep their stored value.
#[derive(Default, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct UpdateProfileRequest {
    #[validate(email)]
    pub email: Option<String>,

    pub name: Option<String>,

    /// At least 8 characters
    #[validate(length(min = 8))]
    pub password: Option<String>,

    pub avatar: Option<String>,

    #[serde(default)]
    pub preferences: PreferencesPayload,
}

impl TryFrom<UpdateProfileRequest> for UserUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProfileRequest) -> Result<Self, Self::Error> {
        request.validate_or_400()?;

        let preferences = request.preferences;
        let notifications = preferences.notifications;

        Ok(UserUpdate {
            email: request.email,
            name: request.name,
            password: request.password,
            avatar: request.avatar,
            preferences: PreferencesUpdate {
                categories: preferences
                    .categories
                    .map(|ids| ids.into_iter().map(Into::into).collect()),
                stores: preferences
                    .stores
                    .map(|ids| ids.into_iter().map(Into::into).collect()),
                notifications: NotificationPreferencesUpdate {
                    email: notifications.email,
                    push: notifications.push,
                    expiry: notifications.expiry,
                    new_deals: notifications.new_deals,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn with_email(email: &str) -> UpdateProfileRequest {
        UpdateProfileRequest {
            email: Some(email.to_string()),
            ..UpdateProfileRequest::default()
        }
    }

    fn with_password(password: &str) -> UpdateProfileRequest {
        UpdateProfileRequest {
            password: Some(password.to_string()),
            ..UpdateProfileRequest::default()
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert!(UserUpdate::try_from(with_email("shopper@example.com")).is_ok(), "valid");
        assert!(UserUpdate::try_from(with_email("shopper.example.com")).is_err(), "no @");
        assert!(UserUpdate::try_from(with_email("@example.com")).is_err(), "no local part");
    }

    #[test]
    fn short_password_is_rejected() -> TestResult {
        let error = UserUpdate::try_from(with_password("1234567"))
            .err()
            .ok_or("seven characters should fail")?;

        assert_eq!(error.brief, "Invalid fields: password");
        assert!(UserUpdate::try_from(with_password("12345678")).is_ok(), "eight characters");

        Ok(())
    }

    #[test]
    fn nested_preferences_are_carried_into_the_update() -> TestResult {
        let category = Uuid::now_v7();
        let request = UpdateProfileRequest {
            preferences: PreferencesPayload {
                categories: Some(vec![category]),
                stores: None,
                notifications: NotificationPreferencesPayload {
                    new_deals: Some(false),
                    ..NotificationPreferencesPayload::default()
                },
            },
            ..UpdateProfileRequest::default()
        };

        let update = UserUpdate::try_from(request)?;

        assert_eq!(
            update.preferences.categories,
            Some(vec![category.into()])
        );
        assert_eq!(update.preferences.stores, None);
        assert_eq!(update.preferences.notifications.new_deals, Some(false));
        assert_eq!(update.preferences.notifications.email, None);

        Ok(())
    }
}
