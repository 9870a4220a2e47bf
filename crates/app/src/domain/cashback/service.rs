//! Cashback service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        cashback::{
            data::{CashbackTransition, NewCashbackTransaction},
            errors::CashbackServiceError,
            records::{CashbackTransactionRecord, CashbackTransactionUuid},
            repository::PgCashbackRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCashbackService {
    db: Db,
    repository: PgCashbackRepository,
}

impl PgCashbackService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCashbackRepository::new(),
        }
    }
}

#[async_trait]
impl CashbackService for PgCashbackService {
    async fn list_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<CashbackTransactionRecord>, CashbackServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let transactions = self.repository.list_transactions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(transactions)
    }

    #[tracing::instrument(
        name = "cashback.service.record_transaction",
        skip(self, transaction),
        fields(
            transaction_uuid = %transaction.uuid,
            user_uuid = %transaction.user,
            amount = transaction.amount
        ),
        err
    )]
    async fn record_transaction(
        &self,
        transaction: NewCashbackTransaction,
    ) -> Result<CashbackTransactionRecord, CashbackServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let recorded = self
            .repository
            .record_transaction(&mut tx, &transaction)
            .await?;

        tx.commit().await?;

        Ok(recorded)
    }

    async fn transition(
        &self,
        transaction: CashbackTransactionUuid,
        transition: CashbackTransition,
    ) -> Result<CashbackTransactionRecord, CashbackServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .repository
            .lock_status(&mut tx, transaction)
            .await?
            .ok_or(CashbackServiceError::NotFound)?;

        let Some(next) = current.apply(transition) else {
            return Err(CashbackServiceError::InvalidTransition {
                current,
                transition,
            });
        };

        let updated = self
            .repository
            .update_status(&mut tx, transaction, current, next)
            .await?;

        tx.commit().await?;

        info!(
            transaction_uuid = %updated.uuid,
            status = %updated.status,
            "cashback transaction moved"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CashbackService: Send + Sync {
    /// A user's cashback transactions, newest first.
    async fn list_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<CashbackTransactionRecord>, CashbackServiceError>;

    /// Record a new `pending` transaction.
    async fn record_transaction(
        &self,
        transaction: NewCashbackTransaction,
    ) -> Result<CashbackTransactionRecord, CashbackServiceError>;

    /// Approve, reject or pay out a transaction.
    async fn transition(
        &self,
        transaction: CashbackTransactionUuid,
        transition: CashbackTransition,
    ) -> Result<CashbackTransactionRecord, CashbackServiceError>;
}
