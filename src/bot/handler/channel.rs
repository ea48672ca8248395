//! Channel event handlers.
//!
//! Deleting a channel that a guild has bound for wishlist or shop notifications clears the
//! binding right away, instead of waiting for the next broadcast to fail on it.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildChannel, Message};

use crate::data::guild_settings::GuildSettingsRepository;

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// # Arguments
/// - `db` - Database connection for clearing bindings
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `channel` - The deleted guild channel from Discord
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let guild_id = channel.guild_id.get();
    let channel_id = channel.id.get();
    let repo = GuildSettingsRepository::new(db);

    match repo.unbind_deleted_channel(channel_id).await {
        Ok(0) => {}
        Ok(cleared) => tracing::warn!(
            guild_id,
            channel_id,
            "Cleared {} binding(s) to deleted channel",
            cleared
        ),
        Err(e) => tracing::error!(
            "Failed to clear bindings to deleted channel {} in guild {}: {:?}",
            channel_id,
            guild_id,
            e
        ),
    }
}
