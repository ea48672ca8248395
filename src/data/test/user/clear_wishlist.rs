use super::*;

/// Tests clearing a wishlist only affects the target user.
///
/// Expected: Ok(2) and the other user's items untouched
#[tokio::test]
async fn clears_only_target_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db)
        .discord_id(1)
        .wishlist(["a", "b"])
        .build()
        .await?;
    UserFactory::new(db).discord_id(2).wishlist(["a"]).build().await?;

    let repo = UserRepository::new(db);
    let cleared = repo.clear_wishlist(1).await?;

    assert_eq!(cleared, 2);
    assert!(repo.find_by_discord_id(1).await?.unwrap().wishlist.is_empty());
    assert_eq!(repo.find_by_discord_id(2).await?.unwrap().wishlist.len(), 1);

    Ok(())
}
