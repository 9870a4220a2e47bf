//! Session token formatting, parsing, and verifier construction.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{
    auth::hex::{decode_hex, encode_hex},
    domain::users::records::UserUuid,
};

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "cs";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionTokenSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionTokenSecret(**redacted**)")
    }
}

impl Drop for SessionTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub session_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub secret: SessionTokenSecret,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionTokenSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionTokenSecret::from_bytes(secret)
}

/// Format as `cs_<version>_<session uuid simple>.<secret hex>`.
#[must_use]
pub fn format_session_token(
    session_uuid: Uuid,
    version: SessionTokenVersion,
    secret: &SessionTokenSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Parse a bearer token.
///
/// # Errors
///
/// Returns an error when the prefix, version, session id or secret is malformed.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret_hex) =
        token.split_once('.').ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let session_uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let session_uuid =
        Uuid::try_parse(session_uuid_segment).map_err(|_| SessionTokenError::InvalidFormat)?;

    let secret = decode_hex::<SESSION_TOKEN_SECRET_BYTES>(secret_hex)
        .ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        session_uuid,
        version,
        secret: SessionTokenSecret::from_bytes(secret),
    })
}

/// Build the canonical verifier input bytes for a token.
///
/// Format: `{session_uuid_hex}:{version_i16_decimal}:{user_uuid_hex}:{secret_hex}`
#[must_use]
pub fn build_verifier_input(
    session_uuid: &Uuid,
    version: SessionTokenVersion,
    user_uuid: &UserUuid,
    secret: &SessionTokenSecret,
) -> Vec<u8> {
    let input = format!(
        "{}:{}:{}:{}",
        session_uuid.simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        encode_hex(secret.as_bytes()),
    );

    input.into_bytes()
}

/// SHA-256 of the verifier input, hex encoded. This is what gets stored.
#[must_use]
pub fn session_token_verifier(verifier_input: &[u8]) -> String {
    encode_hex(&Sha256::digest(verifier_input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recovers_formatted_parts() {
        let session_uuid = Uuid::now_v7();
        let secret = SessionTokenSecret::from_bytes([0xAB; SESSION_TOKEN_SECRET_BYTES]);
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);

        assert!(token.starts_with("cs_v1_"), "unexpected token {token}");

        let parsed = parse_session_token(&token).expect("token should parse");

        assert_eq!(parsed.session_uuid, session_uuid);
        assert_eq!(parsed.version, SessionTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = format!("lt_v1_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert!(matches!(
            parse_session_token(&token),
            Err(SessionTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format!("cs_v9_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert!(matches!(
            parse_session_token(&token),
            Err(SessionTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        let token = format!("cs_v1_{}.abcd", Uuid::nil().simple());

        assert!(matches!(
            parse_session_token(&token),
            Err(SessionTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(parse_session_token("cs_v1_nothing").is_err());
        assert!(parse_session_token("").is_err());
    }

    #[test]
    fn verifier_depends_on_every_part() {
        let session_uuid = Uuid::nil();
        let user_uuid = UserUuid::from_uuid(Uuid::nil());
        let secret = SessionTokenSecret::from_bytes([0xCD; SESSION_TOKEN_SECRET_BYTES]);
        let other_secret = SessionTokenSecret::from_bytes([0xCE; SESSION_TOKEN_SECRET_BYTES]);
        let other_user = UserUuid::new();

        let verifier = session_token_verifier(&build_verifier_input(
            &session_uuid,
            SessionTokenVersion::V1,
            &user_uuid,
            &secret,
        ));

        let again = session_token_verifier(&build_verifier_input(
            &session_uuid,
            SessionTokenVersion::V1,
            &user_uuid,
            &secret,
        ));

        assert_eq!(verifier, again, "verifier must be deterministic");
        assert_eq!(verifier.len(), 64);

        assert_ne!(
            verifier,
            session_token_verifier(&build_verifier_input(
                &session_uuid,
                SessionTokenVersion::V1,
                &user_uuid,
                &other_secret,
            ))
        );

        assert_ne!(
            verifier,
            session_token_verifier(&build_verifier_input(
                &session_uuid,
                SessionTokenVersion::V1,
                &other_user,
                &secret,
            ))
        );
    }
}
