//! Guild settings factory for creating channel bindings in tests.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating guild settings rows.
///
/// Defaults bind a wishlist channel and leave the shop channel unset.
pub struct GuildSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    wishlist_channel_id: Option<String>,
    shop_channel_id: Option<String>,
}

impl<'a> GuildSettingsFactory<'a> {
    /// Creates a new GuildSettingsFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented
    /// - wishlist_channel_id: auto-incremented
    /// - shop_channel_id: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            wishlist_channel_id: Some(next_id().to_string()),
            shop_channel_id: None,
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id.to_string();
        self
    }

    /// Sets or clears the wishlist channel binding.
    pub fn wishlist_channel_id(mut self, channel_id: Option<u64>) -> Self {
        self.wishlist_channel_id = channel_id.map(|id| id.to_string());
        self
    }

    /// Sets or clears the shop channel binding.
    pub fn shop_channel_id(mut self, channel_id: Option<u64>) -> Self {
        self.shop_channel_id = channel_id.map(|id| id.to_string());
        self
    }

    /// Builds and inserts the guild settings row.
    pub async fn build(self) -> Result<entity::guild_settings::Model, DbErr> {
        entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            wishlist_channel_id: ActiveValue::Set(self.wishlist_channel_id),
            shop_channel_id: ActiveValue::Set(self.shop_channel_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates guild settings with default values.
pub async fn create_guild_settings(
    db: &DatabaseConnection,
) -> Result<entity::guild_settings::Model, DbErr> {
    GuildSettingsFactory::new(db).build().await
}
