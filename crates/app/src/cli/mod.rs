use clap::{Parser, Subcommand};

mod cashback;
mod categories;
mod coupons;
mod db;
mod notifications;
mod stores;

#[derive(Debug, Parser)]
#[command(name = "coupons-app", about = "Coupon marketplace admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Categories(categories::CategoriesCommand),
    Stores(stores::StoresCommand),
    Coupons(coupons::CouponsCommand),
    Notifications(notifications::NotificationsCommand),
    Cashback(cashback::CashbackCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Categories(command) => categories::run(command).await,
            Commands::Stores(command) => stores::run(command).await,
            Commands::Coupons(command) => coupons::run(command).await,
            Commands::Notifications(command) => notifications::run(command).await,
            Commands::Cashback(command) => cashback::run(command).await,
        }
    }
}

/// Connect and wrap the pool for service construction.
async fn connect(database_url: &str) -> Result<coupons_app::database::Db, String> {
    coupons_app::database::connect(database_url)
        .await
        .map(coupons_app::database::Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
