//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_u64,
    domain::{
        categories::records::CategoryUuid,
        coupons::records::CouponUuid,
        stores::records::StoreUuid,
        users::{
            data::{NewUser, UserUpdate},
            records::{NotificationPreferences, UserCredentials, UserPreferences, UserRecord, UserUuid},
        },
    },
    uuids::into_uuids,
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const SAVE_COUPON_SQL: &str = include_str!("sql/save_coupon.sql");
const REMOVE_SAVED_COUPON_SQL: &str = include_str!("sql/remove_saved_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "users.repository.create_user",
        skip(self, tx, user),
        fields(user_uuid = %user.uuid),
        err
    )]
    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(&user.referral_code)
            .fetch_one(&mut **tx)
            .await
    }

    /// Merge `update` into the stored user. `password_hash` replaces the
    /// plain text password carried by the update.
    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &UserUpdate,
        password_hash: Option<&str>,
    ) -> Result<UserRecord, sqlx::Error> {
        let preferences = &update.preferences;
        let notifications = &preferences.notifications;

        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(update.email.as_deref())
            .bind(update.name.as_deref())
            .bind(password_hash)
            .bind(update.avatar.as_deref())
            .bind(preferences.categories.as_deref().map(into_uuids))
            .bind(preferences.stores.as_deref().map(into_uuids))
            .bind(notifications.email)
            .bind(notifications.push)
            .bind(notifications.expiry)
            .bind(notifications.new_deals)
            .fetch_one(&mut **tx)
            .await
    }

    /// Bookmark a coupon. Saving twice is a no-op.
    pub(crate) async fn save_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SAVE_COUPON_SQL)
            .bind(user.into_uuid())
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn remove_saved_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_SAVED_COUPON_SQL)
            .bind(user.into_uuid())
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let categories: Vec<Uuid> = row.try_get("preferred_categories")?;
        let stores: Vec<Uuid> = row.try_get("preferred_stores")?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            avatar: row.try_get("avatar")?,
            preferences: UserPreferences {
                categories: categories.into_iter().map(CategoryUuid::from_uuid).collect(),
                stores: stores.into_iter().map(StoreUuid::from_uuid).collect(),
                notifications: NotificationPreferences {
                    email: row.try_get("notify_email")?,
                    push: row.try_get("notify_push")?,
                    expiry: row.try_get("notify_expiry")?,
                    new_deals: row.try_get("notify_new_deals")?,
                },
            },
            points_balance: try_get_u64(row, "points_balance")?,
            referral_code: row.try_get("referral_code")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            password_hash: row.try_get("password_hash")?,
        })
    }
}
