use clap::Args;
use coupons_app::domain::{
    categories::records::CategoryUuid,
    stores::{PgStoresService, StoresService, data::NewStore, records::StoreUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateStoreArgs {
    /// Store name; must be unique
    #[arg(long)]
    name: String,

    /// Logo URL
    #[arg(long, default_value = "")]
    logo: String,

    /// Store website
    #[arg(long, default_value = "")]
    website: String,

    /// Feature the store in the popular list
    #[arg(long)]
    popular: bool,

    /// Category UUIDs; unknown ids are ignored
    #[arg(long = "category", value_name = "UUID")]
    categories: Vec<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional store UUID; generated when omitted
    #[arg(long)]
    store_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateStoreArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let service = PgStoresService::new(crate::cli::connect(&args.database_url).await?);

    let store = service
        .create_store(NewStore {
            uuid: args
                .store_uuid
                .map_or_else(StoreUuid::new, StoreUuid::from_uuid),
            name: args.name,
            logo: args.logo,
            website: args.website,
            is_popular: args.popular,
            categories: args
                .categories
                .into_iter()
                .map(CategoryUuid::from_uuid)
                .collect(),
        })
        .await
        .map_err(|error| format!("failed to create store: {error}"))?;

    println!("store_uuid: {}", store.uuid);
    println!("store_name: {}", store.name);
    println!("categories: {}", store.categories.len());

    Ok(())
}
