use crate::{cache::catalog::CatalogCache, service::fortnite::CatalogSource};

/// Refreshes the catalog cache, keeping the previous snapshot on failure.
///
/// # Returns
/// - `true` - A new snapshot was installed
/// - `false` - The fetch failed; the error has been logged
pub async fn refresh_catalog<S>(catalog: &CatalogCache, source: &S) -> bool
where
    S: CatalogSource + ?Sized,
{
    match catalog.refresh(source).await {
        Ok(count) => {
            tracing::info!("Refreshed cosmetic catalog with {} entries", count);
            true
        }
        Err(e) => {
            tracing::warn!(
                "Catalog refresh failed, keeping {} cached entries: {}",
                catalog.snapshot().entries().len(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use serenity::async_trait;

    use super::*;
    use crate::{
        error::upstream::{UpstreamError, UpstreamFaultKind},
        model::cosmetic::{CosmeticCatalogEntry, CosmeticKind},
    };

    struct Source(Option<Vec<CosmeticCatalogEntry>>);

    #[async_trait]
    impl CatalogSource for Source {
        async fn fetch_catalog(&self) -> Result<Vec<CosmeticCatalogEntry>, UpstreamError> {
            self.0.clone().ok_or_else(|| UpstreamError {
                kind: UpstreamFaultKind::RateLimited,
                status: Some(429),
                endpoint: "/v2/cosmetics".to_string(),
                message: "slow down".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let catalog = CatalogCache::new();
        let entries = vec![CosmeticCatalogEntry {
            id: "CID_028".to_string(),
            name: "Renegade Raider".to_string(),
            kind: CosmeticKind::Outfit,
            shop_history: Vec::new(),
        }];

        assert!(refresh_catalog(&catalog, &Source(Some(entries))).await);
        assert!(!refresh_catalog(&catalog, &Source(None)).await);

        assert!(catalog.snapshot().get("CID_028").is_some());
    }
}
