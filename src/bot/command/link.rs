//! `/link` and `/unlink`: associating a Discord user with an Epic Games account.

use serenity::async_trait;

use crate::{
    bot::{dispatch::CommandHandler, responder::Responder},
    error::AppError,
    model::interaction::CommandRequest,
    service::wishlist::format::{truncate, MAX_ECHO_LEN},
    state::AppState,
};

pub struct LinkCommand;

#[async_trait]
impl CommandHandler for LinkCommand {
    async fn execute(
        &self,
        state: &AppState,
        request: &CommandRequest,
        responder: &dyn Responder,
    ) -> Result<(), AppError> {
        let username = request.require_string("username")?.trim();

        let Some(account) = state.accounts.lookup_account(username).await? else {
            return responder
                .reply(&format!(
                    "No Epic account named **{}** was found, or its stats are private.",
                    truncate(username, MAX_ECHO_LEN)
                ))
                .await;
        };

        state
            .users
            .set_linked_account(request.user_id, Some(account.id))
            .await?;

        tracing::info!("User {} linked Epic account {}", request.user_id, account.display_name);

        responder
            .reply(&format!("Linked your Epic account **{}**.", account.display_name))
            .await
    }
}

pub struct UnlinkCommand;

#[async_trait]
impl CommandHandler for UnlinkCommand {
    async fn execute(
        &self,
        state: &AppState,
        request: &CommandRequest,
        responder: &dyn Responder,
    ) -> Result<(), AppError> {
        let linked = state
            .users
            .get(request.user_id)
            .and_then(|user| user.linked_account_id);
        if linked.is_none() {
            return responder.reply("You have no linked Epic account.").await;
        }

        state.users.set_linked_account(request.user_id, None).await?;

        responder.reply("Unlinked your Epic account.").await
    }
}
