//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rand::rngs::OsRng;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, AuthenticatedSession, Credentials, IssuedSession, Registration,
        SessionTokenVersion, SocialIdentityVerifier, SocialLogin, StubSocialIdentityVerifier,
        build_verifier_input, format_session_token, generate_session_secret, hash_password,
        hex::constant_time_eq, models::NewSession, parse_session_token, random_password,
        repository::PgAuthRepository, session_token_verifier, verify_password,
    },
    database::Db,
    domain::users::{
        data::NewUser,
        records::{UserRecord, UserUuid},
        referral::generate_referral_code,
        repository::PgUsersRepository,
    },
};

/// How long an issued session stays valid unless configured otherwise.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(7 * 24);

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    users: PgUsersRepository,
    social: Arc<dyn SocialIdentityVerifier>,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            users: PgUsersRepository::new(),
            social: Arc::new(StubSocialIdentityVerifier),
            session_ttl,
        }
    }

    /// Replace the social identity verifier.
    #[must_use]
    pub fn with_social_verifier(mut self, social: Arc<dyn SocialIdentityVerifier>) -> Self {
        self.social = social;
        self
    }

    async fn issue_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserRecord,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let token_hash = session_token_verifier(&build_verifier_input(
            &session_uuid,
            version,
            &user.uuid,
            &secret,
        ));

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(|_overflow| AuthServiceError::InvalidData)?;

        let session = self
            .repository
            .create_session(
                tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: user.uuid,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

        info!(
            session_uuid = %session.uuid,
            user_uuid = %user.uuid,
            "issued session"
        );

        Ok(IssuedSession {
            token,
            user,
            session,
        })
    }

    async fn touch_session(&self, session_uuid: Uuid) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.touch_session(&mut tx, session_uuid).await?;

        tx.commit().await
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(name = "auth.service.login", skip(self, credentials), err)]
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stored = self
            .users
            .find_credentials_by_email(&mut tx, &credentials.email)
            .await?
            .ok_or(AuthServiceError::Unauthorized)?;

        if !verify_password(&credentials.password, &stored.password_hash) {
            return Err(AuthServiceError::Unauthorized);
        }

        let user = self.users.get_user(&mut tx, stored.uuid).await?;
        let issued = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        Ok(issued)
    }

    #[tracing::instrument(
        name = "auth.service.register",
        skip(self, registration),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn register(&self, registration: Registration) -> Result<IssuedSession, AuthServiceError> {
        let new_user = NewUser {
            uuid: UserUuid::new(),
            referral_code: generate_referral_code(&registration.name, &mut OsRng),
            password_hash: hash_password(&registration.password)?,
            email: registration.email,
            name: registration.name,
        };

        tracing::Span::current().record("user_uuid", tracing::field::display(new_user.uuid));

        let mut tx = self.db.begin_transaction().await?;

        let user = self.users.create_user(&mut tx, &new_user).await?;
        let issued = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        Ok(issued)
    }

    #[tracing::instrument(
        name = "auth.service.social_login",
        skip(self, login),
        fields(provider = %login.provider),
        err
    )]
    async fn social_login(&self, login: SocialLogin) -> Result<IssuedSession, AuthServiceError> {
        let identity = self.social.verify(&login.provider, &login.token).await?;

        let mut tx = self.db.begin_transaction().await?;

        let user = match self.users.find_user_by_email(&mut tx, &identity.email).await? {
            Some(user) => user,
            None => {
                let new_user = NewUser {
                    uuid: UserUuid::new(),
                    referral_code: generate_referral_code(&identity.name, &mut OsRng),
                    password_hash: hash_password(&random_password())?,
                    email: identity.email,
                    name: identity.name,
                };

                self.users.create_user(&mut tx, &new_user).await?
            }
        };

        let issued = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        Ok(issued)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedSession, AuthServiceError> {
        let parsed_token =
            parse_session_token(bearer_token).map_err(|_| AuthServiceError::Unauthorized)?;

        let mut tx = self.db.begin_transaction().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, parsed_token.session_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::Unauthorized)?;

        tx.commit().await?;

        if session.version != parsed_token.version {
            return Err(AuthServiceError::Unauthorized);
        }

        let expected = session_token_verifier(&build_verifier_input(
            &parsed_token.session_uuid,
            parsed_token.version,
            &session.user_uuid,
            &parsed_token.secret,
        ));

        if !constant_time_eq(expected.as_bytes(), session.token_hash.as_bytes()) {
            return Err(AuthServiceError::Unauthorized);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self.touch_session(parsed_token.session_uuid).await {
            warn!(%error, "failed to record session use");
        }

        Ok(AuthenticatedSession {
            session_uuid: parsed_token.session_uuid,
            user_uuid: session.user_uuid,
        })
    }

    async fn logout(&self, session_uuid: Uuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let revoked = self.repository.revoke_session(&mut tx, session_uuid).await?;

        tx.commit().await?;

        if !revoked {
            return Err(AuthServiceError::Unauthorized);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Password login.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Create an account and sign it in.
    async fn register(&self, registration: Registration) -> Result<IssuedSession, AuthServiceError>;

    /// Sign in with a social provider token, creating the account on first use.
    async fn social_login(&self, login: SocialLogin) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to its active session.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedSession, AuthServiceError>;

    /// Revoke a session.
    async fn logout(&self, session_uuid: Uuid) -> Result<(), AuthServiceError>;
}
