//! `/wishlist add | remove | clear | view`.

use std::time::Duration;

use serenity::async_trait;

use crate::{
    bot::{dispatch::CommandHandler, responder::Responder},
    error::{internal::InternalError, AppError},
    model::{
        interaction::{CommandRequest, Confirmation},
        user::ClearOutcome,
    },
    service::wishlist::{
        format::{truncate, ChunkedMessage, MAX_ECHO_LEN, MAX_MESSAGE_LEN},
        AddOutcome, RemoveOutcome, WishlistService,
    },
    state::AppState,
};

/// How long the clear confirmation buttons stay active.
pub const CLEAR_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);

pub const CATALOG_LOADING: &str = "The cosmetic catalog is still loading. Please try again later.";

pub struct WishlistCommand;

#[async_trait]
impl CommandHandler for WishlistCommand {
    async fn execute(
        &self,
        state: &AppState,
        request: &CommandRequest,
        responder: &dyn Responder,
    ) -> Result<(), AppError> {
        let service = WishlistService::new(&state.users, &state.catalog);

        match request.subcommand.as_deref() {
            Some("add") => add(&service, request, responder).await,
            Some("remove") => remove(&service, request, responder).await,
            Some("clear") => clear(&service, request, responder).await,
            Some("view") => view(&service, request, responder).await,
            other => Err(InternalError::UnsupportedSubcommand {
                command: request.command.clone(),
                subcommand: other.unwrap_or_default().to_string(),
            }
            .into()),
        }
    }
}

async fn add(
    service: &WishlistService<'_>,
    request: &CommandRequest,
    responder: &dyn Responder,
) -> Result<(), AppError> {
    let query = request.require_string("cosmetic")?;

    let message = match service.add(request.user_id, query).await? {
        AddOutcome::Added(name) => format!("Added **{}** to your wishlist.", name),
        AddOutcome::AlreadyPresent(name) => format!("**{}** is already on your wishlist.", name),
        AddOutcome::NotFound => format!(
            "No cosmetic matching **{}** was found.",
            truncate(query, MAX_ECHO_LEN)
        ),
        AddOutcome::CatalogUnavailable => CATALOG_LOADING.to_string(),
    };

    responder.reply(&message).await
}

async fn remove(
    service: &WishlistService<'_>,
    request: &CommandRequest,
    responder: &dyn Responder,
) -> Result<(), AppError> {
    let query = request.require_string("wishlisted")?;

    let message = match service.remove(request.user_id, query).await? {
        RemoveOutcome::Removed(name) => format!("Removed **{}** from your wishlist.", name),
        RemoveOutcome::NotFound => format!(
            "**{}** is not on your wishlist.",
            truncate(query, MAX_ECHO_LEN)
        ),
    };

    responder.reply(&message).await
}

/// Asks for confirmation before emptying the wishlist. Every ending of the prompt edits it
/// in place and removes its buttons.
async fn clear(
    service: &WishlistService<'_>,
    request: &CommandRequest,
    responder: &dyn Responder,
) -> Result<(), AppError> {
    let count = service.count(request.user_id);
    if count == 0 {
        return responder.reply("Your wishlist is already empty.").await;
    }

    let prompt = format!(
        "Remove all {} items from your wishlist? This cannot be undone.",
        count
    );
    let confirmation = responder
        .confirm(&prompt, CLEAR_CONFIRMATION_TIMEOUT)
        .await?;

    let message = match confirmation {
        Confirmation::Confirmed => match service.clear(request.user_id).await? {
            ClearOutcome::Cleared(n) => format!("Cleared {} items from your wishlist.", n),
            ClearOutcome::NothingToClear => "Your wishlist is already empty.".to_string(),
        },
        Confirmation::Cancelled => "Your wishlist was not changed.".to_string(),
        Confirmation::Expired => {
            "Confirmation timed out. Your wishlist was not changed.".to_string()
        }
    };

    responder.edit(&message).await
}

async fn view(
    service: &WishlistService<'_>,
    request: &CommandRequest,
    responder: &dyn Responder,
) -> Result<(), AppError> {
    let entries = service.view(request.user_id);
    if entries.is_empty() {
        return responder
            .reply("Your wishlist is empty. Add items with `/wishlist add`.")
            .await;
    }

    let message = ChunkedMessage::new(
        format!("**Your wishlist ({} items)**", entries.len()),
        entries.iter().map(|entry| format!("• {}", entry.label())),
        MAX_MESSAGE_LEN,
    );

    for chunk in message.chunks() {
        responder.reply(&chunk).await?;
    }

    Ok(())
}
