//! Auth Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod me;
pub(crate) mod register;
pub(crate) mod social_login;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use uuid::Uuid;

    use coupons_app::{
        auth::{IssuedSession, SessionMetadata},
        domain::users::records::UserUuid,
    };

    use crate::test_helpers::make_user;

    pub(super) fn make_issued_session(user: UserUuid, token: &str) -> IssuedSession {
        IssuedSession {
            token: token.to_string(),
            user: make_user(user),
            session: SessionMetadata {
                uuid: Uuid::now_v7(),
                user_uuid: user,
                created_at: Timestamp::UNIX_EPOCH,
                last_used_at: None,
                expires_at: Timestamp::UNIX_EPOCH,
                revoked_at: None,
            },
        }
    }
}
