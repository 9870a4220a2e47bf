//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use coupons_app::{auth::AuthenticatedSession, domain::users::records::UserUuid};

/// Helpers for storing the authenticated caller and mapping depot extraction
/// failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session(&mut self, session: AuthenticatedSession);

    fn session_or_401(&self) -> Result<AuthenticatedSession, StatusError>;

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session(&mut self, session: AuthenticatedSession) {
        self.inject(session);
    }

    fn session_or_401(&self) -> Result<AuthenticatedSession, StatusError> {
        self.obtain::<AuthenticatedSession>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.session_or_401().map(|session| session.user_uuid)
    }
}
