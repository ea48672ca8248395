//! Delivery of plain text messages to guild channels.

use std::{collections::HashSet, sync::Arc};

use serenity::{
    all::{ChannelId, CreateAllowedMentions, CreateMessage, GuildId, UserId},
    async_trait,
    http::Http,
};

use crate::{
    error::AppError,
    util::discord::{error_response, MISSING_ACCESS, MISSING_PERMISSIONS, UNKNOWN_CHANNEL},
};

/// Page size of the list guild members endpoint.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Result of sending one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// The channel no longer exists.
    ChannelUnavailable,
    /// The bot cannot view or post in the channel.
    PermissionDenied,
}

#[async_trait]
pub trait MessagingSink: Send + Sync {
    /// Sends `text` to a channel.
    ///
    /// # Returns
    /// - `Ok(SendOutcome)` - Sent, or a channel fault the caller should self-heal from
    /// - `Err(AppError)` - Any other failure
    async fn send_to_channel(&self, channel_id: u64, text: &str) -> Result<SendOutcome, AppError>;

    /// Ids of every member of a guild.
    async fn guild_member_ids(&self, guild_id: u64) -> Result<HashSet<u64>, AppError>;
}

/// Maps a failed send to the channel fault it represents, if any.
pub fn classify_send_error(err: &serenity::Error) -> Option<SendOutcome> {
    match error_response(err)? {
        (_, UNKNOWN_CHANNEL) | (404, _) => Some(SendOutcome::ChannelUnavailable),
        (_, MISSING_ACCESS | MISSING_PERMISSIONS) | (403, _) => Some(SendOutcome::PermissionDenied),
        _ => None,
    }
}

/// [`MessagingSink`] backed by the bot's HTTP client.
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessagingSink for DiscordSink {
    async fn send_to_channel(&self, channel_id: u64, text: &str) -> Result<SendOutcome, AppError> {
        // Mentions are rendered but only users are pinged, never roles or everyone.
        let message = CreateMessage::new()
            .content(text)
            .allowed_mentions(CreateAllowedMentions::new().all_users(true));

        match ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await
        {
            Ok(_) => Ok(SendOutcome::Sent),
            Err(e) => match classify_send_error(&e) {
                Some(outcome) => {
                    tracing::debug!("Send to channel {} failed: {}", channel_id, e);
                    Ok(outcome)
                }
                None => Err(e.into()),
            },
        }
    }

    async fn guild_member_ids(&self, guild_id: u64) -> Result<HashSet<u64>, AppError> {
        let guild_id = GuildId::new(guild_id);
        let mut ids = HashSet::new();
        let mut after: Option<UserId> = None;

        loop {
            let members = self
                .http
                .get_guild_members(guild_id, Some(MEMBER_PAGE_SIZE), after.map(|id| id.get()))
                .await?;

            let page_len = members.len() as u64;
            after = members.last().map(|member| member.user.id);
            ids.extend(members.iter().map(|member| member.user.id.get()));

            if page_len < MEMBER_PAGE_SIZE {
                break;
            }
        }

        Ok(ids)
    }
}
