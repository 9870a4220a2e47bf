use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct CategoriesCommand {
    #[command(subcommand)]
    command: CategoriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CategoriesSubcommand {
    Create(create::CreateCategoryArgs),
}

pub(crate) async fn run(command: CategoriesCommand) -> Result<(), String> {
    match command.command {
        CategoriesSubcommand::Create(args) => create::run(args).await,
    }
}
