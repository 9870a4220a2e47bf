//! Cashback Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::cashback::records::CashbackTransactionRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CashbackTransactionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub coupon_id: Uuid,
    pub store_id: Uuid,

    /// Minor currency units
    pub amount: u64,

    /// One of `pending`, `approved`, `rejected` or `paid`
    pub status: String,

    pub transaction_date: String,

    /// Present once the transaction is paid
    pub payout_date: Option<String>,
}

impl From<CashbackTransactionRecord> for CashbackTransactionResponse {
    fn from(transaction: CashbackTransactionRecord) -> Self {
        CashbackTransactionResponse {
            id: transaction.uuid.into(),
            user_id: transaction.user.into(),
            coupon_id: transaction.coupon.into(),
            store_id: transaction.store.into(),
            amount: transaction.amount,
            status: transaction.status.as_str().to_string(),
            transaction_date: transaction.transaction_date.to_string(),
            payout_date: transaction.payout_date.map(|date| date.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CashbackTransactionsResponse {
    pub transactions: Vec<CashbackTransactionResponse>,
}

impl From<Vec<CashbackTransactionRecord>> for CashbackTransactionsResponse {
    fn from(transactions: Vec<CashbackTransactionRecord>) -> Self {
        CashbackTransactionsResponse {
            transactions: transactions.into_iter().map(Into::into).collect(),
        }
    }
}
