//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user rows and their wishlist
//! items. Wishlist items reference their user through a foreign key, so every write that
//! adds an item first makes sure the user row exists, inside the same transaction.

use std::collections::HashMap;

use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{error::AppError, model::user::UserRecord};

/// Repository providing database operations for users and wishlists.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every user together with their wishlist.
    ///
    /// Issues one query for users and one for all wishlist items, then groups items by
    /// user. Used to populate the in-memory user cache at startup.
    ///
    /// # Returns
    /// - `Ok(Vec<UserRecord>)` - All stored users ordered by Discord ID
    /// - `Err(AppError::DbErr)` - Database error during either query
    /// - `Err(AppError::InternalErr)` - A stored Discord ID is not numeric
    pub async fn get_all(&self) -> Result<Vec<UserRecord>, AppError> {
        let users = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::DiscordId)
            .all(self.db)
            .await?;

        let mut items_by_user: HashMap<String, Vec<entity::user_wishlist_item::Model>> =
            HashMap::new();
        for item in entity::prelude::UserWishlistItem::find().all(self.db).await? {
            items_by_user
                .entry(item.user_id.clone())
                .or_default()
                .push(item);
        }

        users
            .into_iter()
            .map(|user| {
                let items = items_by_user.remove(&user.discord_id).unwrap_or_default();
                UserRecord::from_entity(user, items)
            })
            .collect()
    }

    /// Finds a user and their wishlist by Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(UserRecord))` - User found
    /// - `Ok(None)` - No user stored with that Discord ID
    /// - `Err(AppError)` - Database or id conversion error
    pub async fn find_by_discord_id(&self, user_id: u64) -> Result<Option<UserRecord>, AppError> {
        let Some(user) = entity::prelude::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let items = entity::prelude::UserWishlistItem::find()
            .filter(entity::user_wishlist_item::Column::UserId.eq(user.discord_id.clone()))
            .all(self.db)
            .await?;

        Ok(Some(UserRecord::from_entity(user, items)?))
    }

    /// Sets or clears the linked Epic account for a user.
    ///
    /// Inserts the user if they have never been stored, otherwise only the
    /// `epic_account_id` column is updated. Repeating the call with the same value is a
    /// no-op.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `epic_account_id` - Account to link, or `None` to unlink
    pub async fn set_epic_account(
        &self,
        user_id: u64,
        epic_account_id: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(user_id.to_string()),
            epic_account_id: ActiveValue::Set(epic_account_id),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_column(entity::user::Column::EpicAccountId)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(())
    }

    /// Adds a cosmetic to a user's wishlist.
    ///
    /// Creates the user row if needed. Adding an id that is already present succeeds
    /// without writing.
    ///
    /// # Returns
    /// - `Ok(true)` - The item was inserted
    /// - `Ok(false)` - The item was already on the wishlist
    /// - `Err(DbErr)` - Database error; the transaction is rolled back
    pub async fn add_wishlist_item(&self, user_id: u64, cosmetic_id: &str) -> Result<bool, DbErr> {
        let user_id = user_id.to_string();
        let txn = self.db.begin().await?;

        let existing_user = entity::prelude::User::find_by_id(user_id.clone())
            .one(&txn)
            .await?;
        if existing_user.is_none() {
            entity::user::ActiveModel {
                discord_id: ActiveValue::Set(user_id.clone()),
                epic_account_id: ActiveValue::Set(None),
            }
            .insert(&txn)
            .await?;
        }

        let existing_item =
            entity::prelude::UserWishlistItem::find_by_id((user_id.clone(), cosmetic_id.to_string()))
                .one(&txn)
                .await?;
        let inserted = if existing_item.is_none() {
            entity::user_wishlist_item::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                cosmetic_id: ActiveValue::Set(cosmetic_id.to_string()),
            }
            .insert(&txn)
            .await?;
            true
        } else {
            false
        };

        txn.commit().await?;

        Ok(inserted)
    }

    /// Removes a cosmetic from a user's wishlist.
    ///
    /// # Returns
    /// - `Ok(true)` - The item was removed
    /// - `Ok(false)` - The item was not on the wishlist (or the user does not exist)
    pub async fn remove_wishlist_item(
        &self,
        user_id: u64,
        cosmetic_id: &str,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::UserWishlistItem::delete_many()
            .filter(entity::user_wishlist_item::Column::UserId.eq(user_id.to_string()))
            .filter(entity::user_wishlist_item::Column::CosmeticId.eq(cosmetic_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes every item from a user's wishlist.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of items removed
    pub async fn clear_wishlist(&self, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::UserWishlistItem::delete_many()
            .filter(entity::user_wishlist_item::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
