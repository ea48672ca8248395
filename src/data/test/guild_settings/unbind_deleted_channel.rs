use super::*;

/// Tests a deleted channel is cleared from every binding that references it.
///
/// Expected: Ok(2) with both bindings of guild 1 cleared and guild 2 untouched
#[tokio::test]
async fn clears_all_references() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    GuildSettingsFactory::new(db)
        .guild_id(1)
        .wishlist_channel_id(Some(11))
        .shop_channel_id(Some(11))
        .build()
        .await?;
    GuildSettingsFactory::new(db)
        .guild_id(2)
        .wishlist_channel_id(Some(22))
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let cleared = repo.unbind_deleted_channel(11).await?;

    assert_eq!(cleared, 2);
    let first = repo.find_by_guild_id(1).await?.unwrap();
    assert_eq!(first.wishlist_channel_id, None);
    assert_eq!(first.shop_channel_id, None);
    let second = repo.find_by_guild_id(2).await?.unwrap();
    assert_eq!(second.wishlist_channel_id, Some(22));

    Ok(())
}
