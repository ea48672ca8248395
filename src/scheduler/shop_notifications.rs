use sea_orm::DatabaseConnection;

use crate::{
    cache::user::UserCache,
    error::AppError,
    service::{
        fortnite::ShopSource,
        notification::{sink::MessagingSink, BroadcastReport, NotificationBroadcaster},
    },
};

/// Fetches today's shop and posts it, then notifies wishlists.
///
/// The shop is fetched once and shared by both broadcasts. If it cannot be fetched nothing
/// is sent for the day.
///
/// # Returns
/// - `Ok((shop, wishlists))` - Reports of both broadcasts
/// - `Err(AppError::Upstream)` - The shop could not be fetched
pub async fn broadcast_daily<Src, Snk>(
    db: &DatabaseConnection,
    users: &UserCache,
    source: &Src,
    sink: &Snk,
) -> Result<(BroadcastReport, BroadcastReport), AppError>
where
    Src: ShopSource + ?Sized,
    Snk: MessagingSink + ?Sized,
{
    let shop = source.fetch_current_shop().await?;
    tracing::info!("Fetched {} items from today's shop", shop.len());

    let broadcaster = NotificationBroadcaster::new(db, users, sink);

    let shop_report = broadcaster.broadcast_shop(&shop).await?;
    let wishlist_report = broadcaster.broadcast_wishlists(&shop).await?;

    Ok((shop_report, wishlist_report))
}
