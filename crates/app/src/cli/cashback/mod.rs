use clap::{Args, Subcommand};
use coupons_app::domain::cashback::data::CashbackTransition;

mod record;
mod transition;

#[derive(Debug, Args)]
pub(crate) struct CashbackCommand {
    #[command(subcommand)]
    command: CashbackSubcommand,
}

#[derive(Debug, Subcommand)]
enum CashbackSubcommand {
    /// Record a pending cashback transaction
    Record(record::RecordCashbackArgs),

    /// Approve a pending transaction
    Approve(transition::TransitionArgs),

    /// Reject a pending transaction
    Reject(transition::TransitionArgs),

    /// Pay out an approved transaction
    Pay(transition::TransitionArgs),
}

pub(crate) async fn run(command: CashbackCommand) -> Result<(), String> {
    match command.command {
        CashbackSubcommand::Record(args) => record::run(args).await,
        CashbackSubcommand::Approve(args) => {
            transition::run(args, CashbackTransition::Approve).await
        }
        CashbackSubcommand::Reject(args) => transition::run(args, CashbackTransition::Reject).await,
        CashbackSubcommand::Pay(args) => transition::run(args, CashbackTransition::Pay).await,
    }
}
