use crate::error::{config::ConfigError, AppError};

const FORTNITE_API_URL: &str = "https://fortnite-api.com";

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,

    pub fortnite_api_url: String,
    /// Optional key sent in the `Authorization` header; only the stats endpoint requires it.
    pub fortnite_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            fortnite_api_url: std::env::var("FORTNITE_API_URL")
                .unwrap_or_else(|_| FORTNITE_API_URL.to_string()),
            fortnite_api_key: std::env::var("FORTNITE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
        })
    }
}
