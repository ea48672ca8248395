use super::*;

/// Tests unbinding the channel that is still bound.
///
/// Expected: Ok(true) and the binding cleared
#[tokio::test]
async fn clears_matching_binding() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id(1)
        .wishlist_channel_id(Some(11))
        .shop_channel_id(Some(12))
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let cleared = repo.unbind_channel(1, ChannelBinding::Wishlist, 11).await?;

    assert!(cleared);
    let settings = repo.find_by_guild_id(1).await?.unwrap();
    assert_eq!(settings.wishlist_channel_id, None);
    assert_eq!(settings.shop_channel_id, Some(12));

    Ok(())
}

/// Tests a stale unbind does not clear a newer binding.
///
/// Expected: Ok(false) and the binding unchanged
#[tokio::test]
async fn keeps_rebound_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id(1)
        .wishlist_channel_id(Some(99))
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let cleared = repo.unbind_channel(1, ChannelBinding::Wishlist, 11).await?;

    assert!(!cleared);
    let settings = repo.find_by_guild_id(1).await?.unwrap();
    assert_eq!(settings.wishlist_channel_id, Some(99));

    Ok(())
}
