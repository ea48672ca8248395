use serenity::async_trait;

use crate::{
    bot::{
        command::wishlist::CATALOG_LOADING,
        dispatch::CommandHandler,
        responder::Responder,
    },
    error::AppError,
    model::{cosmetic::CosmeticCatalogEntry, interaction::CommandRequest},
    service::wishlist::{
        format::{truncate, MAX_ECHO_LEN},
        resolve,
    },
    state::AppState,
};

/// `/cosmetic name`: shows catalog details for a single item.
pub struct CosmeticCommand;

#[async_trait]
impl CommandHandler for CosmeticCommand {
    async fn execute(
        &self,
        state: &AppState,
        request: &CommandRequest,
        responder: &dyn Responder,
    ) -> Result<(), AppError> {
        let query = request.require_string("name")?;

        let snapshot = state.catalog.snapshot();
        if snapshot.is_empty() {
            return responder.reply(CATALOG_LOADING).await;
        }

        let Some(entry) = resolve(&snapshot, query) else {
            return responder
                .reply(&format!(
                    "No cosmetic matching **{}** was found.",
                    truncate(query, MAX_ECHO_LEN)
                ))
                .await;
        };

        let wishlisted = state
            .users
            .get(request.user_id)
            .is_some_and(|user| user.wishlist.contains(&entry.id));

        responder.reply(&describe(entry, wishlisted)).await
    }
}

fn describe(entry: &CosmeticCatalogEntry, wishlisted: bool) -> String {
    let last_seen = match entry.last_seen() {
        Some(at) => format!(
            "{} ({} appearances)",
            at.format("%Y-%m-%d"),
            entry.shop_history.len()
        ),
        None => "Never sold in the item shop".to_string(),
    };

    let mut lines = vec![
        format!("**{}**", entry.name),
        format!("Type: {}", entry.kind.display_name()),
        format!("ID: `{}`", entry.id),
        format!("Last seen: {}", last_seen),
    ];
    if wishlisted {
        lines.push("On your wishlist".to_string());
    }

    lines.join("\n")
}
