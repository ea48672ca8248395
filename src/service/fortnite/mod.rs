//! Fortnite-API client and the pull interfaces built on it.
//!
//! Consumers depend on the [`CatalogSource`], [`ShopSource`] and [`AccountLookup`] traits
//! rather than on [`FortniteApiClient`] directly, so caches, schedulers and commands can be
//! tested with in-memory sources.

pub mod dto;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serenity::async_trait;

use crate::{
    config::Config,
    error::upstream::UpstreamError,
    model::cosmetic::{CosmeticCatalogEntry, EpicAccount, ShopEntry},
};

use self::dto::{CosmeticsDto, Envelope, ShopDto, StatsDto};

const COSMETICS_ENDPOINT: &str = "/v2/cosmetics";
const SHOP_ENDPOINT: &str = "/v2/shop";
const STATS_ENDPOINT: &str = "/v2/stats/br/v2";

/// Source of the full cosmetic catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<CosmeticCatalogEntry>, UpstreamError>;
}

/// Source of today's item shop.
#[async_trait]
pub trait ShopSource: Send + Sync {
    async fn fetch_current_shop(&self) -> Result<Vec<ShopEntry>, UpstreamError>;
}

/// Resolves an Epic display name to an account.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// # Returns
    /// - `Ok(Some(EpicAccount))` - Account found
    /// - `Ok(None)` - No such account, or the account hides its stats and therefore its id
    /// - `Err(UpstreamError)` - The API failed
    async fn lookup_account(&self, name: &str) -> Result<Option<EpicAccount>, UpstreamError>;
}

/// HTTP client for `fortnite-api.com`.
#[derive(Debug, Clone)]
pub struct FortniteApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FortniteApiClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            config.fortnite_api_url.clone(),
            config.fortnite_api_key.clone(),
        )
    }

    /// Sends a GET request and decodes the `data` field of the response envelope.
    async fn get<T>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, endpoint))
            .query(query);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(endpoint, status = %status, body = %body, "Fortnite-API returned error");
            return Err(UpstreamError::from_status(endpoint, status, body));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| UpstreamError::from_reqwest(endpoint, e))?;

        envelope
            .data
            .ok_or_else(|| UpstreamError::malformed(endpoint, "response has no data field"))
    }
}

#[async_trait]
impl CatalogSource for FortniteApiClient {
    async fn fetch_catalog(&self) -> Result<Vec<CosmeticCatalogEntry>, UpstreamError> {
        let cosmetics: CosmeticsDto = self.get(COSMETICS_ENDPOINT, &[]).await?;
        Ok(dto::catalog_entries(cosmetics))
    }
}

#[async_trait]
impl ShopSource for FortniteApiClient {
    async fn fetch_current_shop(&self) -> Result<Vec<ShopEntry>, UpstreamError> {
        let shop: ShopDto = self.get(SHOP_ENDPOINT, &[]).await?;
        Ok(dto::shop_entries(shop))
    }
}

#[async_trait]
impl AccountLookup for FortniteApiClient {
    async fn lookup_account(&self, name: &str) -> Result<Option<EpicAccount>, UpstreamError> {
        match self.get::<StatsDto>(STATS_ENDPOINT, &[("name", name)]).await {
            Ok(stats) => Ok(stats.account.map(EpicAccount::from)),
            Err(err)
                if matches!(
                    err.status.and_then(|s| StatusCode::from_u16(s).ok()),
                    Some(StatusCode::NOT_FOUND | StatusCode::FORBIDDEN)
                ) =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
