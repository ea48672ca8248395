use std::sync::Arc;

use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};

use crate::{bot::handler::Handler, config::Config, error::AppError};

/// Initializes the Discord bot client and returns the HTTP client for shared use.
///
/// The HTTP client is handed to the broadcast scheduler so it can post messages without
/// a second connection.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `handler` - Event handler wrapping the interaction dispatcher
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - The client to start and its HTTP client
/// - `Err(AppError)` - The client could not be built
pub async fn init_bot(config: &Config, handler: Handler) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS is privileged and must be enabled in the Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Connects to the gateway and runs until the connection is closed.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
