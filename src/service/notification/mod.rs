//! Daily fan-out of wishlist matches and the shop listing to guild channels.
//!
//! Guilds are processed concurrently, chunks within a guild strictly in order. A channel
//! that turns out to be deleted or unusable is unbound and the broadcast moves on, so one
//! broken guild never stops the others from being notified.

pub mod sink;

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::Utc;
use futures::future::join_all;
use sea_orm::DatabaseConnection;

use crate::{
    cache::user::UserCache,
    data::guild_settings::GuildSettingsRepository,
    error::AppError,
    model::{
        cosmetic::ShopEntry,
        guild_settings::{ChannelBinding, GuildSettings},
    },
    service::wishlist::{
        format::{format_notification, ChunkedMessage, MAX_MESSAGE_LEN},
        matching::match_shop_to_wishlists,
    },
};

use self::sink::{MessagingSink, SendOutcome};

/// Per-broadcast tally of guild outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Guilds that received every chunk.
    pub delivered: usize,
    /// Guilds whose channel binding was cleared.
    pub unbound: usize,
    /// Guilds that failed for any other reason.
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuildOutcome {
    Delivered,
    Unbound,
    Failed,
}

impl FromIterator<GuildOutcome> for BroadcastReport {
    fn from_iter<I: IntoIterator<Item = GuildOutcome>>(outcomes: I) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut report, outcome| {
                match outcome {
                    GuildOutcome::Delivered => report.delivered += 1,
                    GuildOutcome::Unbound => report.unbound += 1,
                    GuildOutcome::Failed => report.failed += 1,
                }
                report
            })
    }
}

pub struct NotificationBroadcaster<'a, S: MessagingSink + ?Sized> {
    db: &'a DatabaseConnection,
    users: &'a UserCache,
    sink: &'a S,
}

impl<'a, S: MessagingSink + ?Sized> NotificationBroadcaster<'a, S> {
    pub fn new(db: &'a DatabaseConnection, users: &'a UserCache, sink: &'a S) -> Self {
        Self { db, users, sink }
    }

    /// Notifies every guild with a wishlist channel about members' wishlisted items in
    /// today's shop.
    ///
    /// Guilds whose member list cannot be fetched count as failed. Guilds without any
    /// matching member receive nothing and are not counted.
    ///
    /// # Returns
    /// - `Ok(BroadcastReport)` - Outcome tally
    /// - `Err(AppError::DbErr)` - Bound guilds could not be loaded
    pub async fn broadcast_wishlists(&self, shop: &[ShopEntry]) -> Result<BroadcastReport, AppError> {
        let guilds = GuildSettingsRepository::new(self.db)
            .get_all_bound(ChannelBinding::Wishlist)
            .await?;

        let member_lists = join_all(guilds.iter().map(|guild| async move {
            (guild.guild_id, self.sink.guild_member_ids(guild.guild_id).await)
        }))
        .await;

        let mut failed = 0;
        let mut guild_members: HashMap<u64, HashSet<u64>> = HashMap::new();
        for (guild_id, members) in member_lists {
            match members {
                Ok(members) => {
                    guild_members.insert(guild_id, members);
                }
                Err(e) => {
                    tracing::error!("Failed to fetch members of guild {}: {}", guild_id, e);
                    failed += 1;
                }
            }
        }

        let users = self.users.all();
        let matches = match_shop_to_wishlists(shop, &users, &guild_members);

        let deliveries = guilds.iter().filter_map(|guild| {
            let guild_matches = matches.get(&guild.guild_id)?;
            let message = format_notification(guild_matches, MAX_MESSAGE_LEN);
            Some(async move { self.deliver(guild, ChannelBinding::Wishlist, &message).await })
        });

        let mut report: BroadcastReport = join_all(deliveries).await.into_iter().collect();
        report.failed += failed;

        tracing::info!(
            "Wishlist broadcast finished: {} delivered, {} unbound, {} failed",
            report.delivered,
            report.unbound,
            report.failed
        );

        Ok(report)
    }

    /// Posts today's shop listing to every guild with a shop channel.
    pub async fn broadcast_shop(&self, shop: &[ShopEntry]) -> Result<BroadcastReport, AppError> {
        let guilds = GuildSettingsRepository::new(self.db)
            .get_all_bound(ChannelBinding::Shop)
            .await?;

        let message = format_shop(shop);

        let report: BroadcastReport = join_all(
            guilds
                .iter()
                .map(|guild| self.deliver(guild, ChannelBinding::Shop, &message)),
        )
        .await
        .into_iter()
        .collect();

        tracing::info!(
            "Shop broadcast finished: {} delivered, {} unbound, {} failed",
            report.delivered,
            report.unbound,
            report.failed
        );

        Ok(report)
    }

    /// Sends every chunk to the guild's bound channel, in order.
    async fn deliver(
        &self,
        guild: &GuildSettings,
        binding: ChannelBinding,
        message: &ChunkedMessage,
    ) -> GuildOutcome {
        let Some(channel_id) = guild.channel(binding) else {
            return GuildOutcome::Failed;
        };

        for chunk in message.chunks() {
            match self.sink.send_to_channel(channel_id, &chunk).await {
                Ok(SendOutcome::Sent) => {}
                Ok(fault) => return self.unbind(guild.guild_id, binding, channel_id, fault).await,
                Err(e) => {
                    tracing::error!(
                        "Failed to send {} notification to channel {} in guild {}: {}",
                        binding.label(),
                        channel_id,
                        guild.guild_id,
                        e
                    );
                    return GuildOutcome::Failed;
                }
            }
        }

        GuildOutcome::Delivered
    }

    async fn unbind(
        &self,
        guild_id: u64,
        binding: ChannelBinding,
        channel_id: u64,
        fault: SendOutcome,
    ) -> GuildOutcome {
        tracing::warn!(
            "Unbinding {} channel {} in guild {}: {:?}",
            binding.label(),
            channel_id,
            guild_id,
            fault
        );

        match GuildSettingsRepository::new(self.db)
            .unbind_channel(guild_id, binding, channel_id)
            .await
        {
            Ok(_) => GuildOutcome::Unbound,
            Err(e) => {
                tracing::error!(
                    "Failed to unbind {} channel of guild {}: {}",
                    binding.label(),
                    guild_id,
                    e
                );
                GuildOutcome::Failed
            }
        }
    }
}

/// Formats the shop as a header plus one line per distinct cosmetic name, sorted.
pub fn format_shop(shop: &[ShopEntry]) -> ChunkedMessage {
    let names: BTreeSet<&str> = shop.iter().map(|entry| entry.name.as_str()).collect();
    let header = format!("**Item shop for {}**", Utc::now().format("%B %-d, %Y"));

    ChunkedMessage::new(
        header,
        names.into_iter().map(|name| format!("• {}", name)),
        MAX_MESSAGE_LEN,
    )
}
