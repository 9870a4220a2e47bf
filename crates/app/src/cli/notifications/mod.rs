use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum NotificationsSubcommand {
    Create(create::CreateNotificationArgs),
}

pub(crate) async fn run(command: NotificationsCommand) -> Result<(), String> {
    match command.command {
        NotificationsSubcommand::Create(args) => create::run(args).await,
    }
}
