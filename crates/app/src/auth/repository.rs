//! Sessions repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::{
        SessionTokenVersion,
        models::{ActiveSession, NewSession, SessionMetadata},
    },
    domain::users::records::UserUuid,
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &NewSession,
    ) -> Result<SessionMetadata, sqlx::Error> {
        query_as::<Postgres, SessionMetadata>(CREATE_SESSION_SQL)
            .bind(session.uuid)
            .bind(session.user_uuid.into_uuid())
            .bind(session.version.as_i16())
            .bind(&session.token_hash)
            .bind(SqlxTimestamp::from(session.expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a session that is neither revoked nor expired.
    pub(crate) async fn find_active_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session_uuid: Uuid,
        version: SessionTokenVersion,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_ACTIVE_SESSION_SQL)
            .bind(session_uuid)
            .bind(version.as_i16())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn touch_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session_uuid: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_SQL)
            .bind(session_uuid)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Returns `true` if the session was active.
    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session_uuid: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(REVOKE_SESSION_SQL)
            .bind(session_uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version: i16 = row.try_get("version")?;

        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: SessionTokenVersion::try_from(version).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "version".to_string(),
                    source: Box::new(e),
                }
            })?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SessionMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
