use clap::Args;
use coupons_app::domain::cashback::{
    CashbackService, PgCashbackService, data::CashbackTransition,
    records::CashbackTransactionUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct TransitionArgs {
    /// Transaction UUID
    #[arg(long)]
    transaction_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: TransitionArgs, transition: CashbackTransition) -> Result<(), String> {
    let service = PgCashbackService::new(crate::cli::connect(&args.database_url).await?);

    let transaction = service
        .transition(
            CashbackTransactionUuid::from_uuid(args.transaction_uuid),
            transition,
        )
        .await
        .map_err(|error| format!("failed to {transition} cashback transaction: {error}"))?;

    println!("transaction_uuid: {}", transaction.uuid);
    println!("status: {}", transaction.status);

    if let Some(payout_date) = transaction.payout_date {
        println!("payout_date: {payout_date}");
    }

    Ok(())
}
