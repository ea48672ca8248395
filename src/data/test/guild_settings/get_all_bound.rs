use super::*;

/// Tests only guilds with the requested binding are returned.
///
/// Expected: Ok with the wishlist-bound guild only
#[tokio::test]
async fn filters_by_binding() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id(1)
        .wishlist_channel_id(Some(11))
        .build()
        .await?;
    GuildSettingsFactory::new(db)
        .guild_id(2)
        .wishlist_channel_id(None)
        .shop_channel_id(Some(22))
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);

    let wishlist = repo.get_all_bound(ChannelBinding::Wishlist).await?;
    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist[0].guild_id, 1);

    let shop = repo.get_all_bound(ChannelBinding::Shop).await?;
    assert_eq!(shop.len(), 1);
    assert_eq!(shop[0].guild_id, 2);

    Ok(())
}
