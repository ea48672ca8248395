//! Process-wide cosmetic catalog snapshot.
//!
//! Readers clone an `Arc` of the current snapshot and keep using it for the whole
//! operation. A refresh builds a complete new snapshot off to the side and swaps the `Arc`,
//! so a reader sees either the previous or the new catalog, never a mix.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    error::upstream::UpstreamError, model::cosmetic::CosmeticCatalogEntry,
    service::fortnite::CatalogSource,
};

/// An immutable catalog with an id index.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    entries: Vec<CosmeticCatalogEntry>,
    index: HashMap<String, usize>,
}

impl CatalogSnapshot {
    pub fn new(entries: Vec<CosmeticCatalogEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.id.to_lowercase(), position))
            .collect();

        Self { entries, index }
    }

    /// Looks up an entry by id, ignoring ASCII case.
    ///
    /// `None` means the id is no longer resolvable, which is expected for wishlist ids
    /// that were removed from the game after being added.
    pub fn get(&self, id: &str) -> Option<&CosmeticCatalogEntry> {
        self.index
            .get(&id.to_lowercase())
            .map(|&position| &self.entries[position])
    }

    pub fn entries(&self) -> &[CosmeticCatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct CatalogCache {
    snapshot: RwLock<Arc<CatalogSnapshot>>,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogCache {
    /// Creates a cache holding an empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::default())),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the whole catalog.
    pub fn replace(&self, entries: Vec<CosmeticCatalogEntry>) {
        let snapshot = Arc::new(CatalogSnapshot::new(entries));
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Fetches a new catalog and swaps it in.
    ///
    /// On failure, or when the source returns no entries, the previous snapshot is kept.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of entries in the new snapshot
    /// - `Err(UpstreamError)` - The source failed; the previous snapshot is still served
    pub async fn refresh<S>(&self, source: &S) -> Result<usize, UpstreamError>
    where
        S: CatalogSource + ?Sized,
    {
        let entries = source.fetch_catalog().await?;
        if entries.is_empty() {
            return Err(UpstreamError::malformed(
                "catalog",
                "catalog source returned no entries",
            ));
        }

        let count = entries.len();
        self.replace(entries);

        tracing::info!("Catalog refreshed with {} cosmetics", count);

        Ok(count)
    }
}
