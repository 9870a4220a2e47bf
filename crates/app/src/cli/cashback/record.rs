use clap::Args;
use coupons_app::domain::{
    cashback::{
        CashbackService, PgCashbackService, data::NewCashbackTransaction,
        records::CashbackTransactionUuid,
    },
    coupons::records::CouponUuid,
    stores::records::StoreUuid,
    users::records::UserUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RecordCashbackArgs {
    #[arg(long)]
    user_uuid: Uuid,

    #[arg(long)]
    coupon_uuid: Uuid,

    #[arg(long)]
    store_uuid: Uuid,

    /// Amount in minor currency units
    #[arg(long)]
    amount: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RecordCashbackArgs) -> Result<(), String> {
    let service = PgCashbackService::new(crate::cli::connect(&args.database_url).await?);

    let transaction = service
        .record_transaction(NewCashbackTransaction {
            uuid: CashbackTransactionUuid::new(),
            user: UserUuid::from_uuid(args.user_uuid),
            coupon: CouponUuid::from_uuid(args.coupon_uuid),
            store: StoreUuid::from_uuid(args.store_uuid),
            amount: args.amount,
        })
        .await
        .map_err(|error| format!("failed to record cashback transaction: {error}"))?;

    println!("transaction_uuid: {}", transaction.uuid);
    println!("status: {}", transaction.status);

    Ok(())
}
