mod bot;
mod cache;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    bot::{command::registry, dispatch::Dispatcher, handler::Handler},
    cache::{catalog::CatalogCache, user::UserCache},
    config::Config,
    error::AppError,
    service::fortnite::FortniteApiClient,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let api = Arc::new(FortniteApiClient::from_config(http_client, &config));

    let users = Arc::new(UserCache::new(db.clone()));
    let catalog = Arc::new(CatalogCache::new());
    startup::load_caches(&users, &catalog, api.as_ref()).await?;

    let state = AppState::new(db.clone(), users.clone(), catalog.clone(), api.clone());
    let dispatcher = Arc::new(Dispatcher::new(registry(), state));

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, Handler::new(dispatcher)).await?;

    // Start catalog refresh and daily broadcast scheduler
    scheduler::start_scheduler(db, users, catalog, api, discord_http).await?;

    bot::start::start_bot(bot_client).await
}
