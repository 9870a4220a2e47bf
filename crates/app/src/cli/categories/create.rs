use clap::Args;
use coupons_app::domain::categories::{
    CategoriesService, PgCategoriesService, data::NewCategory, records::CategoryUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    /// URL slug; must be unique
    #[arg(long)]
    slug: String,

    /// Icon identifier
    #[arg(long, default_value = "")]
    icon: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional category UUID; generated when omitted
    #[arg(long)]
    category_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    if args.slug.trim().is_empty() {
        return Err("slug cannot be empty".to_string());
    }

    let service = PgCategoriesService::new(crate::cli::connect(&args.database_url).await?);

    let category = service
        .create_category(NewCategory {
            uuid: args
                .category_uuid
                .map_or_else(CategoryUuid::new, CategoryUuid::from_uuid),
            name: args.name,
            slug: args.slug,
            icon: args.icon,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_slug: {}", category.slug);

    Ok(())
}
