use clap::{Args, Subcommand};

mod refresh_expiring_soon;

#[derive(Debug, Args)]
pub(crate) struct CouponsCommand {
    #[command(subcommand)]
    command: CouponsSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponsSubcommand {
    /// Recompute which coupons expire within the next seven days
    RefreshExpiringSoon(refresh_expiring_soon::RefreshExpiringSoonArgs),
}

pub(crate) async fn run(command: CouponsCommand) -> Result<(), String> {
    match command.command {
        CouponsSubcommand::RefreshExpiringSoon(args) => refresh_expiring_soon::run(args).await,
    }
}
