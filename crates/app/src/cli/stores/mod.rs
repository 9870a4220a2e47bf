use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct StoresCommand {
    #[command(subcommand)]
    command: StoresSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoresSubcommand {
    Create(create::CreateStoreArgs),
}

pub(crate) async fn run(command: StoresCommand) -> Result<(), String> {
    match command.command {
        StoresSubcommand::Create(args) => create::run(args).await,
    }
}
