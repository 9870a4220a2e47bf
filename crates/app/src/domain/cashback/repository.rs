//! Cashback Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{try_get_parsed, try_get_u64, try_i64},
    domain::{
        cashback::{
            data::{CashbackStatus, NewCashbackTransaction},
            records::{CashbackTransactionRecord, CashbackTransactionUuid},
        },
        coupons::records::CouponUuid,
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
};

const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const RECORD_TRANSACTION_SQL: &str = include_str!("sql/record_transaction.sql");
const TRANSITION_TRANSACTION_SQL: &str = include_str!("sql/transition_transaction.sql");
const GET_TRANSACTION_STATUS_SQL: &str = include_str!("sql/get_transaction_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCashbackRepository;

impl PgCashbackRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CashbackTransactionRecord>, sqlx::Error> {
        query_as::<Postgres, CashbackTransactionRecord>(LIST_TRANSACTIONS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn record_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: &NewCashbackTransaction,
    ) -> Result<CashbackTransactionRecord, sqlx::Error> {
        query_as::<Postgres, CashbackTransactionRecord>(RECORD_TRANSACTION_SQL)
            .bind(transaction.uuid.into_uuid())
            .bind(transaction.user.into_uuid())
            .bind(transaction.coupon.into_uuid())
            .bind(transaction.store.into_uuid())
            .bind(try_i64(transaction.amount, "amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Move a transaction from `current` to `next`. Paying stamps the payout
    /// date. Fails with `RowNotFound` if the stored status is no longer
    /// `current`.
    #[tracing::instrument(
        name = "cashback.repository.update_status",
        skip(self, tx),
        fields(transaction_uuid = %transaction, %current, %next),
        err
    )]
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: CashbackTransactionUuid,
        current: CashbackStatus,
        next: CashbackStatus,
    ) -> Result<CashbackTransactionRecord, sqlx::Error> {
        query_as::<Postgres, CashbackTransactionRecord>(TRANSITION_TRANSACTION_SQL)
            .bind(transaction.into_uuid())
            .bind(current.as_str())
            .bind(next.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Current status, locking the row until the transaction ends.
    pub(crate) async fn lock_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: CashbackTransactionUuid,
    ) -> Result<Option<CashbackStatus>, sqlx::Error> {
        let status: Option<String> = query_scalar(GET_TRANSACTION_STATUS_SQL)
            .bind(transaction.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        status
            .map(|status| status.parse::<CashbackStatus>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })
    }
}

impl<'r> FromRow<'r, PgRow> for CashbackTransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CashbackTransactionUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            coupon: CouponUuid::from_uuid(row.try_get("coupon_uuid")?),
            store: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            amount: try_get_u64(row, "amount")?,
            status: try_get_parsed(row, "status")?,
            transaction_date: row.try_get::<SqlxTimestamp, _>("transaction_date")?.to_jiff(),
            payout_date: row
                .try_get::<Option<SqlxTimestamp>, _>("payout_date")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
