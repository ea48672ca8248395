use super::*;

/// Tests removing an item on the wishlist.
///
/// Expected: Ok(true) and the item gone
#[tokio::test]
async fn removes_present_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db)
        .discord_id(9)
        .wishlist(["CID_A", "CID_B"])
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let removed = repo.remove_wishlist_item(9, "CID_A").await?;

    assert!(removed);
    let user = repo.find_by_discord_id(9).await?.unwrap();
    assert!(!user.wishlist.contains("CID_A"));
    assert!(user.wishlist.contains("CID_B"));

    Ok(())
}

/// Tests removing an item that is not on the wishlist.
///
/// Expected: Ok(false) for both a known user and an unknown user
#[tokio::test]
async fn removing_absent_item_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).discord_id(9).wishlist(["CID_A"]).build().await?;

    let repo = UserRepository::new(db);
    assert!(!repo.remove_wishlist_item(9, "CID_Z").await?);
    assert!(!repo.remove_wishlist_item(10, "CID_A").await?);

    Ok(())
}
