use super::*;

/// Tests loading users with their wishlists grouped per user.
///
/// Expected: Ok with each user carrying only their own items
#[tokio::test]
async fn loads_users_with_grouped_wishlists() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db)
        .discord_id(1)
        .epic_account_id("epic-1")
        .wishlist(["a", "b"])
        .build()
        .await?;
    UserFactory::new(db).discord_id(2).wishlist(["c"]).build().await?;
    UserFactory::new(db).discord_id(3).build().await?;

    let repo = UserRepository::new(db);
    let users = repo.get_all().await?;

    assert_eq!(users.len(), 3);
    let first = users.iter().find(|u| u.id == 1).unwrap();
    assert_eq!(first.linked_account_id.as_deref(), Some("epic-1"));
    assert_eq!(
        first.wishlist.iter().cloned().collect::<Vec<_>>(),
        vec!["a".to_string(), "b".to_string()]
    );
    let second = users.iter().find(|u| u.id == 2).unwrap();
    assert_eq!(second.wishlist.len(), 1);
    assert!(second.wishlist.contains("c"));
    let third = users.iter().find(|u| u.id == 3).unwrap();
    assert!(third.wishlist.is_empty());

    Ok(())
}

/// Tests loading from an empty database.
///
/// Expected: Ok with an empty vector
#[tokio::test]
async fn returns_empty_when_no_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let users = UserRepository::new(db).get_all().await?;

    assert!(users.is_empty());

    Ok(())
}

/// Tests that a query against a missing table fails instead of returning no users.
///
/// Expected: Err with database error
#[tokio::test]
async fn fails_without_tables() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db).get_all().await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
}
