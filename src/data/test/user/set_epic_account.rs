use super::*;

/// Tests linking an account for a user that has never been stored.
///
/// Expected: Ok with the user row created and the account set
#[tokio::test]
async fn creates_user_with_linked_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.set_epic_account(42, Some("epic-42".to_string()))
        .await?;

    let user = repo.find_by_discord_id(42).await?.unwrap();
    assert_eq!(user.linked_account_id.as_deref(), Some("epic-42"));

    Ok(())
}

/// Tests relinking and unlinking preserve the wishlist.
///
/// Expected: Ok with account replaced, then cleared, wishlist untouched
#[tokio::test]
async fn updates_account_and_preserves_wishlist() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db)
        .discord_id(7)
        .epic_account_id("old")
        .wishlist(["a"])
        .build()
        .await?;

    let repo = UserRepository::new(db);
    repo.set_epic_account(7, Some("new".to_string())).await?;
    let user = repo.find_by_discord_id(7).await?.unwrap();
    assert_eq!(user.linked_account_id.as_deref(), Some("new"));

    repo.set_epic_account(7, None).await?;
    let user = repo.find_by_discord_id(7).await?.unwrap();
    assert_eq!(user.linked_account_id, None);
    assert!(user.wishlist.contains("a"));

    Ok(())
}
