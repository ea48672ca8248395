use super::*;

/// Tests adding an item for an unknown user creates the user.
///
/// Expected: Ok(true) and a user with exactly one wishlist item
#[tokio::test]
async fn creates_user_on_first_add() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let inserted = repo.add_wishlist_item(5, "CID_A").await?;

    assert!(inserted);
    let user = repo.find_by_discord_id(5).await?.unwrap();
    assert_eq!(user.wishlist.len(), 1);
    assert!(user.wishlist.contains("CID_A"));
    assert_eq!(user.linked_account_id, None);

    Ok(())
}

/// Tests adding an item that is already present.
///
/// Expected: Ok(false) and no duplicate row
#[tokio::test]
async fn adding_existing_item_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).discord_id(5).wishlist(["CID_A"]).build().await?;

    let repo = UserRepository::new(db);
    let inserted = repo.add_wishlist_item(5, "CID_A").await?;

    assert!(!inserted);
    let user = repo.find_by_discord_id(5).await?.unwrap();
    assert_eq!(user.wishlist.len(), 1);

    Ok(())
}
