use super::*;

/// Tests the first settings write creates the row.
///
/// Expected: Ok with the wishlist channel bound and the shop channel unset
#[tokio::test]
async fn creates_settings_lazily() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    assert!(repo.find_by_guild_id(100).await?.is_none());

    let settings = repo
        .set_channel(100, ChannelBinding::Wishlist, Some(200))
        .await?;

    assert_eq!(settings.guild_id, 100);
    assert_eq!(settings.wishlist_channel_id, Some(200));
    assert_eq!(settings.shop_channel_id, None);

    Ok(())
}

/// Tests writing one binding preserves the other.
///
/// Expected: Ok with both bindings present after two writes
#[tokio::test]
async fn preserves_other_binding() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    repo.set_channel(100, ChannelBinding::Wishlist, Some(200))
        .await?;
    let settings = repo.set_channel(100, ChannelBinding::Shop, Some(300)).await?;

    assert_eq!(settings.wishlist_channel_id, Some(200));
    assert_eq!(settings.shop_channel_id, Some(300));

    let settings = repo.set_channel(100, ChannelBinding::Wishlist, None).await?;
    assert_eq!(settings.wishlist_channel_id, None);
    assert_eq!(settings.shop_channel_id, Some(300));

    Ok(())
}
