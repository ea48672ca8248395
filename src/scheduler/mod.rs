//! Cron jobs run alongside the bot.
//!
//! Both jobs share one [`JobScheduler`]. A failed run is logged and the next run is
//! attempted on schedule; nothing is retried in between.

pub mod catalog_refresh;
pub mod shop_notifications;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::http::Http;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    cache::{catalog::CatalogCache, user::UserCache},
    error::AppError,
    service::{
        fortnite::FortniteApiClient,
        notification::sink::DiscordSink,
    },
};

/// Catalog refresh at the top of every hour.
const CATALOG_REFRESH_SCHEDULE: &str = "0 0 * * * *";
/// Shop and wishlist broadcast one minute after the 00:00 UTC shop rotation.
const DAILY_BROADCAST_SCHEDULE: &str = "0 1 0 * * *";

/// Starts the catalog refresh and daily broadcast scheduler
///
/// # Arguments
/// - `db`: Database connection
/// - `users`: User cache read for wishlist matching
/// - `catalog`: Catalog cache swapped by each refresh
/// - `api`: Fortnite API client for catalog and shop data
/// - `discord_http`: Discord HTTP client for sending notifications
pub async fn start_scheduler(
    db: DatabaseConnection,
    users: Arc<UserCache>,
    catalog: Arc<CatalogCache>,
    api: Arc<FortniteApiClient>,
    discord_http: Arc<Http>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_catalog = catalog.clone();
    let job_api = api.clone();
    let refresh = Job::new_async(CATALOG_REFRESH_SCHEDULE, move |_uuid, _lock| {
        let catalog = job_catalog.clone();
        let api = job_api.clone();

        Box::pin(async move {
            catalog_refresh::refresh_catalog(&catalog, api.as_ref()).await;
        })
    })?;

    let sink = Arc::new(DiscordSink::new(discord_http));
    let broadcast = Job::new_async(DAILY_BROADCAST_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let users = users.clone();
        let api = api.clone();
        let sink = sink.clone();

        Box::pin(async move {
            if let Err(e) =
                shop_notifications::broadcast_daily(&db, &users, api.as_ref(), sink.as_ref()).await
            {
                tracing::error!("Error processing daily shop broadcast: {}", e);
            }
        })
    })?;

    scheduler.add(refresh).await?;
    scheduler.add(broadcast).await?;
    scheduler.start().await?;

    tracing::info!("Catalog refresh and shop broadcast scheduler started");

    Ok(())
}
