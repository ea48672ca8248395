//! Reply surface of a single interaction.
//!
//! Discord allows exactly one initial response per interaction; everything after it must
//! be a follow-up or an edit. [`Responder`] implementations track whether the initial
//! response went out so callers never have to.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use serenity::{
    all::{
        ButtonStyle, CommandInteraction, Context, CreateActionRow, CreateAutocompleteResponse,
        CreateButton, CreateInteractionResponse, CreateInteractionResponseFollowup,
        CreateInteractionResponseMessage, EditInteractionResponse,
    },
    async_trait,
};

use crate::{
    error::AppError,
    model::interaction::{Confirmation, Suggestion},
};

const CONFIRM_ID: &str = "confirm";
const CANCEL_ID: &str = "cancel";

#[async_trait]
pub trait Responder: Send + Sync {
    /// Sends the initial response, or a follow-up if it was already sent.
    async fn reply(&self, content: &str) -> Result<(), AppError>;

    async fn follow_up(&self, content: &str) -> Result<(), AppError>;

    /// Replaces the content of the initial response and removes its components.
    async fn edit(&self, content: &str) -> Result<(), AppError>;

    /// Answers an autocomplete interaction. A second call is ignored.
    async fn autocomplete(&self, choices: Vec<Suggestion>) -> Result<(), AppError>;

    /// Shows `prompt` with confirm and cancel buttons and waits for the invoking user.
    ///
    /// Only the first click counts. Without a click within `timeout` the prompt expires.
    /// The prompt stays on screen in every case; callers finish it with [`Responder::edit`].
    async fn confirm(&self, prompt: &str, timeout: Duration) -> Result<Confirmation, AppError>;
}

/// [`Responder`] for a serenity command or autocomplete interaction.
pub struct SerenityResponder {
    ctx: Context,
    interaction: CommandInteraction,
    replied: AtomicBool,
}

impl SerenityResponder {
    pub fn new(ctx: Context, interaction: CommandInteraction) -> Self {
        Self {
            ctx,
            interaction,
            replied: AtomicBool::new(false),
        }
    }

    /// Claims the initial response. Returns `false` if it was already claimed.
    fn claim_initial(&self) -> bool {
        !self.replied.swap(true, Ordering::SeqCst)
    }
}

#[async_trait]
impl Responder for SerenityResponder {
    async fn reply(&self, content: &str) -> Result<(), AppError> {
        if !self.claim_initial() {
            return self.follow_up(content).await;
        }

        let message = CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true);
        self.interaction
            .create_response(&self.ctx.http, CreateInteractionResponse::Message(message))
            .await?;

        Ok(())
    }

    async fn follow_up(&self, content: &str) -> Result<(), AppError> {
        let followup = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);
        self.interaction
            .create_followup(&self.ctx.http, followup)
            .await?;

        Ok(())
    }

    async fn edit(&self, content: &str) -> Result<(), AppError> {
        let edit = EditInteractionResponse::new()
            .content(content)
            .components(Vec::new());
        self.interaction
            .edit_response(&self.ctx.http, edit)
            .await?;

        Ok(())
    }

    async fn autocomplete(&self, choices: Vec<Suggestion>) -> Result<(), AppError> {
        if !self.claim_initial() {
            tracing::debug!(
                "Ignoring second autocomplete response for /{}",
                self.interaction.data.name
            );
            return Ok(());
        }

        let response = choices
            .into_iter()
            .fold(CreateAutocompleteResponse::new(), |response, choice| {
                response.add_string_choice(choice.name, choice.value)
            });
        self.interaction
            .create_response(&self.ctx.http, CreateInteractionResponse::Autocomplete(response))
            .await?;

        Ok(())
    }

    async fn confirm(&self, prompt: &str, timeout: Duration) -> Result<Confirmation, AppError> {
        if !self.claim_initial() {
            return Err(AppError::BadRequest(
                "Confirmation must be the first response to an interaction".to_string(),
            ));
        }

        let buttons = CreateActionRow::Buttons(vec![
            CreateButton::new(CONFIRM_ID)
                .label("Confirm")
                .style(ButtonStyle::Danger),
            CreateButton::new(CANCEL_ID)
                .label("Cancel")
                .style(ButtonStyle::Secondary),
        ]);
        let message = CreateInteractionResponseMessage::new()
            .content(prompt)
            .components(vec![buttons])
            .ephemeral(true);
        self.interaction
            .create_response(&self.ctx.http, CreateInteractionResponse::Message(message))
            .await?;

        let prompt_message = self.interaction.get_response(&self.ctx.http).await?;
        let Some(click) = prompt_message
            .await_component_interaction(&self.ctx.shard)
            .author_id(self.interaction.user.id)
            .timeout(timeout)
            .await
        else {
            return Ok(Confirmation::Expired);
        };

        click
            .create_response(&self.ctx.http, CreateInteractionResponse::Acknowledge)
            .await?;

        Ok(if click.data.custom_id == CONFIRM_ID {
            Confirmation::Confirmed
        } else {
            Confirmation::Cancelled
        })
    }
}
