//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        cashback::{CashbackService, PgCashbackService},
        categories::{CategoriesService, PgCategoriesService},
        coupons::{CouponsService, PgCouponsService},
        notifications::{NotificationsService, PgNotificationsService},
        stores::{PgStoresService, StoresService},
        users::{PgUsersService, UsersService},
    },
    health::{HealthService, PgHealthService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub coupons: Arc<dyn CouponsService>,
    pub stores: Arc<dyn StoresService>,
    pub categories: Arc<dyn CategoriesService>,
    pub users: Arc<dyn UsersService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub cashback: Arc<dyn CashbackService>,
    pub auth: Arc<dyn AuthService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        session_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool), session_ttl))
    }

    #[must_use]
    pub fn from_db(db: &Db, session_ttl: SignedDuration) -> Self {
        Self {
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            stores: Arc::new(PgStoresService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            notifications: Arc::new(PgNotificationsService::new(db.clone())),
            cashback: Arc::new(PgCashbackService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone(), session_ttl)),
            health: Arc::new(PgHealthService::new(db.clone())),
        }
    }
}
