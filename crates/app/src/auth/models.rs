//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::SessionTokenVersion,
    domain::users::records::{UserRecord, UserUuid},
};

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    /// User that owns this session.
    pub user_uuid: UserUuid,

    /// Token format/hash version.
    pub version: SessionTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMetadata {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: UserRecord,
    pub session: SessionMetadata,
}

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub session_uuid: Uuid,
    pub user_uuid: UserUuid,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLogin {
    pub provider: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"**redacted**")
            .finish()
    }
}
