//! Per-guild notification channel bindings.

use crate::{
    error::AppError,
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// Channel bindings configured for a guild.
///
/// Rows are created lazily by the first settings write. A binding is cleared again
/// when the bound channel turns out to be missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSettings {
    /// Discord ID of the guild.
    pub guild_id: u64,
    /// Channel receiving daily wishlist notifications.
    pub wishlist_channel_id: Option<u64>,
    /// Channel receiving the daily shop listing.
    pub shop_channel_id: Option<u64>,
}

impl GuildSettings {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - The converted settings
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored id is not numeric
    pub fn from_entity(entity: entity::guild_settings::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            wishlist_channel_id: parse_optional_u64(entity.wishlist_channel_id)?,
            shop_channel_id: parse_optional_u64(entity.shop_channel_id)?,
        })
    }

    /// Returns the channel bound for the given binding kind.
    pub fn channel(&self, binding: ChannelBinding) -> Option<u64> {
        match binding {
            ChannelBinding::Wishlist => self.wishlist_channel_id,
            ChannelBinding::Shop => self.shop_channel_id,
        }
    }
}

/// Which of a guild's channel bindings an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelBinding {
    Wishlist,
    Shop,
}

impl ChannelBinding {
    pub fn label(self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Shop => "shop",
        }
    }
}
