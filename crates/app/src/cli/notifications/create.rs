use clap::Args;
use coupons_app::domain::{
    coupons::records::CouponUuid,
    notifications::{
        NotificationsService, PgNotificationsService,
        data::{NewNotification, NotificationKind},
        records::NotificationUuid,
    },
    stores::records::StoreUuid,
    users::records::UserUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateNotificationArgs {
    /// Recipient user UUID
    #[arg(long)]
    user_uuid: Uuid,

    /// One of expiry, new, price_alert, system
    #[arg(long = "type", value_name = "TYPE")]
    kind: NotificationKind,

    #[arg(long)]
    title: String,

    #[arg(long)]
    message: String,

    /// Related coupon
    #[arg(long)]
    coupon_uuid: Option<Uuid>,

    /// Related store
    #[arg(long)]
    store_uuid: Option<Uuid>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateNotificationArgs) -> Result<(), String> {
    let service = PgNotificationsService::new(crate::cli::connect(&args.database_url).await?);

    let notification = service
        .create_notification(NewNotification {
            uuid: NotificationUuid::new(),
            user: UserUuid::from_uuid(args.user_uuid),
            kind: args.kind,
            title: args.title,
            message: args.message,
            coupon: args.coupon_uuid.map(CouponUuid::from_uuid),
            store: args.store_uuid.map(StoreUuid::from_uuid),
        })
        .await
        .map_err(|error| format!("failed to create notification: {error}"))?;

    println!("notification_uuid: {}", notification.uuid);

    Ok(())
}
