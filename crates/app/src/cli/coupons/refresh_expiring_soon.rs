use clap::Args;
use coupons_app::domain::coupons::{CouponsService, PgCouponsService};
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct RefreshExpiringSoonArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Reference time (RFC 3339); defaults to now
    #[arg(long)]
    now: Option<String>,
}

pub(crate) async fn run(args: RefreshExpiringSoonArgs) -> Result<(), String> {
    let now = match args.now.as_deref() {
        Some(value) => value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid --now timestamp: {error}"))?,
        None => Timestamp::now(),
    };

    let service = PgCouponsService::new(crate::cli::connect(&args.database_url).await?);

    let changed = service
        .refresh_expiring_soon(now)
        .await
        .map_err(|error| format!("failed to refresh expiring-soon flags: {error}"))?;

    println!("coupons_changed: {changed}");

    Ok(())
}
