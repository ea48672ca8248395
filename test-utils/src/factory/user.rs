//! User factory for creating test user rows and their wishlist items.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .discord_id(123456789)
///     .epic_account_id("4735ce9132924caf8a5b17789b40f79c")
///     .wishlist(["CID_028_Athena_Commando_F"])
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    epic_account_id: Option<String>,
    wishlist: Vec<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: auto-incremented snowflake-sized number
    /// - epic_account_id: `None`
    /// - wishlist: empty
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            discord_id: next_id().to_string(),
            epic_account_id: None,
            wishlist: Vec::new(),
        }
    }

    /// Sets the Discord ID for the user.
    pub fn discord_id(mut self, discord_id: u64) -> Self {
        self.discord_id = discord_id.to_string();
        self
    }

    /// Sets the linked Epic account ID for the user.
    pub fn epic_account_id(mut self, epic_account_id: impl Into<String>) -> Self {
        self.epic_account_id = Some(epic_account_id.into());
        self
    }

    /// Sets the cosmetic IDs inserted as the user's wishlist.
    pub fn wishlist<I, S>(mut self, cosmetic_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wishlist = cosmetic_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Builds and inserts the user row followed by one row per wishlist item.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            epic_account_id: ActiveValue::Set(self.epic_account_id),
        }
        .insert(self.db)
        .await?;

        for cosmetic_id in self.wishlist {
            entity::user_wishlist_item::ActiveModel {
                user_id: ActiveValue::Set(user.discord_id.clone()),
                cosmetic_id: ActiveValue::Set(cosmetic_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(user)
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}
