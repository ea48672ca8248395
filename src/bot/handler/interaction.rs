//! Interaction event handler.
//!
//! Converts serenity interaction payloads into [`CommandRequest`] and
//! [`AutocompleteRequest`] and hands them to the dispatcher. Each interaction already runs
//! in its own task, so a slow handler never blocks other users.

use std::collections::HashMap;

use serenity::all::{CommandInteraction, Context, Interaction, ResolvedOption, ResolvedValue};

use crate::{
    bot::{dispatch::Dispatcher, responder::SerenityResponder},
    model::interaction::{AutocompleteRequest, CommandRequest, OptionValue},
};

/// Handles the interaction_create event.
///
/// Component interactions are ignored here; confirmation prompts collect their own button
/// clicks.
///
/// # Arguments
/// - `dispatcher` - Routes the request to its handler
/// - `ctx` - Discord context used to respond
/// - `interaction` - The inbound interaction
pub async fn handle_interaction(dispatcher: &Dispatcher, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            let request = command_request(&command);
            tracing::debug!(
                "/{} invoked by {} in guild {:?}",
                request.display_name(),
                request.user_id,
                request.guild_id
            );

            let responder = SerenityResponder::new(ctx, command);
            dispatcher.dispatch_command(&request, &responder).await;
        }
        Interaction::Autocomplete(command) => {
            let Some(request) = autocomplete_request(&command) else {
                tracing::warn!(
                    "Autocomplete for /{} arrived without a focused option",
                    command.data.name
                );
                return;
            };

            let responder = SerenityResponder::new(ctx, command);
            dispatcher.dispatch_autocomplete(&request, &responder).await;
        }
        _ => {}
    }
}

/// Builds a platform-neutral request from a slash command interaction.
pub fn command_request(interaction: &CommandInteraction) -> CommandRequest {
    let (subcommand, options) = collect_options(interaction.data.options());

    let can_manage_guild = interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.manage_guild());

    CommandRequest {
        command: interaction.data.name.clone(),
        subcommand,
        options,
        user_id: interaction.user.id.get(),
        guild_id: interaction.guild_id.map(|id| id.get()),
        channel_id: interaction.channel_id.get(),
        can_manage_guild,
    }
}

/// Builds an autocomplete request, or `None` if no option is focused.
pub fn autocomplete_request(interaction: &CommandInteraction) -> Option<AutocompleteRequest> {
    let focused = interaction.data.autocomplete()?;

    Some(AutocompleteRequest {
        command: interaction.data.name.clone(),
        field: focused.name.to_string(),
        value: focused.value.to_string(),
        user_id: interaction.user.id.get(),
        guild_id: interaction.guild_id.map(|id| id.get()),
    })
}

/// Flattens resolved options into the invoked subcommand and its options.
///
/// Option kinds no command uses (attachments, roles, numbers) are skipped.
fn collect_options(
    options: Vec<ResolvedOption<'_>>,
) -> (Option<String>, HashMap<String, OptionValue>) {
    let mut subcommand = None;
    let mut values = HashMap::new();

    for option in options {
        let value = match option.value {
            ResolvedValue::SubCommand(nested) | ResolvedValue::SubCommandGroup(nested) => {
                let (inner, nested_values) = collect_options(nested);
                subcommand = Some(inner.unwrap_or_else(|| option.name.to_string()));
                values.extend(nested_values);
                continue;
            }
            ResolvedValue::String(value) => OptionValue::String(value.to_string()),
            ResolvedValue::Integer(value) => OptionValue::Integer(value),
            ResolvedValue::Boolean(value) => OptionValue::Boolean(value),
            ResolvedValue::Channel(channel) => OptionValue::Channel(channel.id.get()),
            ResolvedValue::User(user, _) => OptionValue::User(user.id.get()),
            _ => continue,
        };
        values.insert(option.name.to_string(), value);
    }

    (subcommand, values)
}
