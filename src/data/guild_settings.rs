//! Guild settings data repository.
//!
//! Stores the wishlist and shop channel bindings of each guild. Unbinding is conditional
//! on the channel that failed still being the bound one, so a broadcast that discovers a
//! dead channel never clobbers a binding an admin changed in the meantime.

use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    error::AppError,
    model::guild_settings::{ChannelBinding, GuildSettings},
};

/// Repository providing database operations for guild channel bindings.
pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

fn column(binding: ChannelBinding) -> entity::guild_settings::Column {
    match binding {
        ChannelBinding::Wishlist => entity::guild_settings::Column::WishlistChannelId,
        ChannelBinding::Shop => entity::guild_settings::Column::ShopChannelId,
    }
}

impl<'a> GuildSettingsRepository<'a> {
    /// Creates a new GuildSettingsRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the settings row of a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))` - Settings exist for the guild
    /// - `Ok(None)` - The guild has never written settings
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildSettings>, AppError> {
        let entity = entity::prelude::GuildSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        entity.map(GuildSettings::from_entity).transpose()
    }

    /// Gets every guild with a channel bound for the given binding.
    ///
    /// # Returns
    /// - `Ok(Vec<GuildSettings>)` - Guilds ordered by guild ID
    pub async fn get_all_bound(
        &self,
        binding: ChannelBinding,
    ) -> Result<Vec<GuildSettings>, AppError> {
        let entities = entity::prelude::GuildSettings::find()
            .filter(column(binding).is_not_null())
            .order_by_asc(entity::guild_settings::Column::GuildId)
            .all(self.db)
            .await?;

        entities.into_iter().map(GuildSettings::from_entity).collect()
    }

    /// Binds (or with `None`, unbinds) a channel, creating the settings row if needed.
    ///
    /// Only the targeted column is written; the other binding is preserved.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Settings after the write
    pub async fn set_channel(
        &self,
        guild_id: u64,
        binding: ChannelBinding,
        channel_id: Option<u64>,
    ) -> Result<GuildSettings, AppError> {
        let channel_id = channel_id.map(|id| id.to_string());
        let mut active = entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            wishlist_channel_id: ActiveValue::Set(None),
            shop_channel_id: ActiveValue::Set(None),
        };
        match binding {
            ChannelBinding::Wishlist => active.wishlist_channel_id = ActiveValue::Set(channel_id),
            ChannelBinding::Shop => active.shop_channel_id = ActiveValue::Set(channel_id),
        }

        let entity = entity::prelude::GuildSettings::insert(active)
            .on_conflict(
                OnConflict::column(entity::guild_settings::Column::GuildId)
                    .update_column(column(binding))
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        GuildSettings::from_entity(entity)
    }

    /// Clears a binding if it still points at `channel_id`.
    ///
    /// # Returns
    /// - `Ok(true)` - The binding was cleared
    /// - `Ok(false)` - The guild is bound to a different channel (or none)
    pub async fn unbind_channel(
        &self,
        guild_id: u64,
        binding: ChannelBinding,
        channel_id: u64,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::GuildSettings::update_many()
            .filter(entity::guild_settings::Column::GuildId.eq(guild_id.to_string()))
            .filter(column(binding).eq(channel_id.to_string()))
            .col_expr(column(binding), Expr::value(Option::<String>::None))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Clears every binding that points at a deleted channel.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bindings cleared across both columns
    pub async fn unbind_deleted_channel(&self, channel_id: u64) -> Result<u64, DbErr> {
        let mut cleared = 0;

        for binding in [ChannelBinding::Wishlist, ChannelBinding::Shop] {
            let result = entity::prelude::GuildSettings::update_many()
                .filter(column(binding).eq(channel_id.to_string()))
                .col_expr(column(binding), Expr::value(Option::<String>::None))
                .exec(self.db)
                .await?;
            cleared += result.rows_affected;
        }

        Ok(cleared)
    }
}
