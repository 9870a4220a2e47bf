//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::hash_password,
    database::Db,
    domain::{
        coupons::{
            records::{CouponRecord, CouponUuid},
            repository::PgCouponsRepository,
        },
        users::{
            data::UserUpdate,
            errors::UsersServiceError,
            records::{UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    coupons: PgCouponsRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            coupons: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    #[tracing::instrument(
        name = "users.service.update_profile",
        skip(self, update),
        fields(user_uuid = %user),
        err
    )]
    async fn update_profile(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let password_hash = update
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .update_user(&mut tx, user, &update, password_hash.as_deref())
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_saved_coupons(
        &self,
        user: UserUuid,
    ) -> Result<Vec<CouponRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupons = self.coupons.list_saved_coupons(&mut tx, user).await?;

        tx.commit().await?;

        Ok(coupons)
    }

    async fn save_coupon(&self, user: UserUuid, coupon: CouponUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .save_coupon(&mut tx, user, coupon)
            .await
            .map_err(|error| match UsersServiceError::from(error) {
                UsersServiceError::InvalidReference => UsersServiceError::CouponNotFound,
                other => other,
            })?;

        tx.commit().await?;

        Ok(())
    }

    async fn remove_saved_coupon(
        &self,
        user: UserUuid,
        coupon: CouponUuid,
    ) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .remove_saved_coupon(&mut tx, user, coupon)
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::SavedCouponNotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Merge a partial update into the user's profile. A new password is
    /// hashed before it is stored.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Saved coupons, most recently saved first.
    async fn list_saved_coupons(&self, user: UserUuid)
    -> Result<Vec<CouponRecord>, UsersServiceError>;

    /// Bookmark a coupon. Saving the same coupon twice is not an error.
    async fn save_coupon(&self, user: UserUuid, coupon: CouponUuid) -> Result<(), UsersServiceError>;

    async fn remove_saved_coupon(
        &self,
        user: UserUuid,
        coupon: CouponUuid,
    ) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::{AuthService, Credentials},
        domain::{
            coupons::CouponsService,
            users::data::{NotificationPreferencesUpdate, PreferencesUpdate},
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn update_profile_merges_present_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("merge@example.com").await?;
        let category = ctx.create_category("Food").await?;

        let updated = ctx
            .users
            .update_profile(
                user.uuid,
                UserUpdate {
                    name: Some("Renamed".to_string()),
                    preferences: PreferencesUpdate {
                        categories: Some(vec![category.uuid]),
                        notifications: NotificationPreferencesUpdate {
                            push: Some(false),
                            ..NotificationPreferencesUpdate::default()
                        },
                        ..PreferencesUpdate::default()
                    },
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.avatar, None);
        assert_eq!(updated.preferences.categories, vec![category.uuid]);
        assert!(updated.preferences.stores.is_empty());
        assert!(!updated.preferences.notifications.push);
        assert!(updated.preferences.notifications.email);
        assert!(updated.preferences.notifications.new_deals);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_rehashes_a_new_password() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("rehash@example.com").await?;

        ctx.users
            .update_profile(
                user.uuid,
                UserUpdate {
                    password: Some("brand-new-password".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await?;

        let issued = ctx
            .auth
            .login(Credentials {
                email: "rehash@example.com".to_string(),
                password: "brand-new-password".to_string(),
            })
            .await?;

        assert_eq!(issued.user.uuid, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_taken_email_returns_email_taken() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("first@example.com").await?;
        let second = ctx.create_user("second@example.com").await?;

        let result = ctx
            .users
            .update_profile(
                second.uuid,
                UserUpdate {
                    email: Some("first@example.com".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::EmailTaken)),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_profile_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_profile(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn save_coupon_is_idempotent_and_listed() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("saver@example.com").await?;
        let store = ctx.create_store("acme").await?;
        let food = ctx.create_category("Food").await?;

        let mut coupon = ctx.new_coupon(store.uuid);
        coupon.categories = smallvec::smallvec![food.uuid];
        let coupon = ctx.coupons.create_coupon(coupon).await?;

        ctx.users.save_coupon(user.uuid, coupon.uuid).await?;
        ctx.users.save_coupon(user.uuid, coupon.uuid).await?;

        let saved = ctx.users.list_saved_coupons(user.uuid).await?;

        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].uuid, coupon.uuid);
        assert_eq!(saved[0].store.uuid, store.uuid);
        assert_eq!(saved[0].categories, vec![food]);

        Ok(())
    }

    #[tokio::test]
    async fn save_coupon_unknown_coupon_returns_coupon_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("missing@example.com").await?;

        let result = ctx.users.save_coupon(user.uuid, CouponUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::CouponNotFound)),
            "expected CouponNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_saved_coupon_missing_pair_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("remover@example.com").await?;
        let store = ctx.create_store("acme").await?;
        let coupon = ctx.coupons.create_coupon(ctx.new_coupon(store.uuid)).await?;

        let result = ctx.users.remove_saved_coupon(user.uuid, coupon.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::SavedCouponNotFound)),
            "expected SavedCouponNotFound, got {result:?}"
        );

        ctx.users.save_coupon(user.uuid, coupon.uuid).await?;
        ctx.users.remove_saved_coupon(user.uuid, coupon.uuid).await?;

        assert!(ctx.users.list_saved_coupons(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_coupon_removes_its_bookmarks() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cascade@example.com").await?;
        let store = ctx.create_store("acme").await?;
        let coupon = ctx.coupons.create_coupon(ctx.new_coupon(store.uuid)).await?;

        ctx.users.save_coupon(user.uuid, coupon.uuid).await?;
        ctx.coupons.delete_coupon(coupon.uuid).await?;

        assert!(ctx.users.list_saved_coupons(user.uuid).await?.is_empty());

        Ok(())
    }
}
