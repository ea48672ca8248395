//! `/settings`: per-guild channel bindings for the daily broadcasts.

use serenity::async_trait;

use crate::{
    bot::{dispatch::CommandHandler, responder::Responder},
    data::guild_settings::GuildSettingsRepository,
    error::{internal::InternalError, AppError},
    model::{
        guild_settings::{ChannelBinding, GuildSettings},
        interaction::CommandRequest,
    },
    state::AppState,
};

pub const GUILD_ONLY: &str = "This command can only be used in a server.";
pub const MISSING_PERMISSION: &str = "You need the Manage Server permission to change settings.";

pub struct SettingsCommand;

#[async_trait]
impl CommandHandler for SettingsCommand {
    async fn execute(
        &self,
        state: &AppState,
        request: &CommandRequest,
        responder: &dyn Responder,
    ) -> Result<(), AppError> {
        let Some(guild_id) = request.guild_id else {
            return responder.reply(GUILD_ONLY).await;
        };
        let repo = GuildSettingsRepository::new(&state.db);

        let binding = match request.subcommand.as_deref() {
            Some("wishlist_channel") => ChannelBinding::Wishlist,
            Some("shop_channel") => ChannelBinding::Shop,
            Some("view") => {
                let settings = repo.find_by_guild_id(guild_id).await?;
                return responder.reply(&describe(settings.as_ref())).await;
            }
            other => {
                return Err(InternalError::UnsupportedSubcommand {
                    command: request.command.clone(),
                    subcommand: other.unwrap_or_default().to_string(),
                }
                .into())
            }
        };

        if !request.can_manage_guild {
            return responder.reply(MISSING_PERMISSION).await;
        }

        let channel_id = request.channel("channel")?;
        repo.set_channel(guild_id, binding, channel_id).await?;

        tracing::info!(
            guild_id,
            channel_id,
            binding = binding.label(),
            user_id = request.user_id,
            "Updated channel binding"
        );

        let message = match channel_id {
            Some(id) => format!("The {} channel is now <#{}>.", binding.label(), id),
            None => format!("The {} channel has been unset.", binding.label()),
        };
        responder.reply(&message).await
    }
}

fn describe(settings: Option<&GuildSettings>) -> String {
    let line = |binding: ChannelBinding| {
        let channel = settings
            .and_then(|s| s.channel(binding))
            .map_or_else(|| "not set".to_string(), |id| format!("<#{}>", id));
        format!("{} channel: {}", capitalize(binding.label()), channel)
    };

    format!(
        "**Server settings**\n{}\n{}",
        line(ChannelBinding::Wishlist),
        line(ChannelBinding::Shop)
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bot::testing::{command_request, test_state, FakeResponder},
        model::interaction::OptionValue,
    };

    async fn run(state: &AppState, request: CommandRequest) -> FakeResponder {
        let responder = FakeResponder::default();
        SettingsCommand
            .execute(state, &request, &responder)
            .await
            .unwrap();
        responder
    }

    #[tokio::test]
    async fn binds_and_views_channels() {
        let state = test_state().await;

        let responder = run(
            &state,
            command_request(
                "settings",
                Some("wishlist_channel"),
                vec![("channel", OptionValue::Channel(555))],
            ),
        )
        .await;
        assert_eq!(responder.replies(), ["The wishlist channel is now <#555>."]);

        let responder = run(&state, command_request("settings", Some("view"), vec![])).await;
        assert_eq!(
            responder.replies(),
            ["**Server settings**\nWishlist channel: <#555>\nShop channel: not set"]
        );
    }

    #[tokio::test]
    async fn omitted_channel_unbinds() {
        let state = test_state().await;
        run(
            &state,
            command_request(
                "settings",
                Some("shop_channel"),
                vec![("channel", OptionValue::Channel(777))],
            ),
        )
        .await;

        let responder = run(&state, command_request("settings", Some("shop_channel"), vec![])).await;

        assert_eq!(responder.replies(), ["The shop channel has been unset."]);
        let settings = GuildSettingsRepository::new(&state.db)
            .find_by_guild_id(10)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(settings.shop_channel_id, None);
    }

    #[tokio::test]
    async fn requires_manage_guild() {
        let state = test_state().await;
        let mut request = command_request(
            "settings",
            Some("wishlist_channel"),
            vec![("channel", OptionValue::Channel(555))],
        );
        request.can_manage_guild = false;

        let responder = run(&state, request).await;

        assert_eq!(responder.replies(), [MISSING_PERMISSION]);
        assert!(GuildSettingsRepository::new(&state.db)
            .find_by_guild_id(10)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn rejects_direct_messages() {
        let state = test_state().await;
        let mut request = command_request("settings", Some("view"), vec![]);
        request.guild_id = None;

        let responder = run(&state, request).await;

        assert_eq!(responder.replies(), [GUILD_ONLY]);
    }
}
