//! Wishlist operations behind the `/wishlist` commands.
//!
//! Free-text input is resolved to exactly one cosmetic with a single strategy used by
//! every command path: an exact id match first, then the best fuzzy name match.

pub mod format;
pub mod matching;

use crate::{
    cache::{
        catalog::{CatalogCache, CatalogSnapshot},
        user::UserCache,
    },
    error::AppError,
    model::{
        cosmetic::CosmeticCatalogEntry,
        interaction::Suggestion,
        user::ClearOutcome,
    },
    service::fuzzy,
};

/// Discord's limit for choice names and values.
const MAX_CHOICE_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    AlreadyPresent(String),
    NotFound,
    /// No catalog has been loaded yet.
    CatalogUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(String),
    NotFound,
}

pub struct WishlistService<'a> {
    users: &'a UserCache,
    catalog: &'a CatalogCache,
}

/// Resolves a query to a catalog entry by id, then by fuzzy name.
pub fn resolve<'s>(snapshot: &'s CatalogSnapshot, query: &str) -> Option<&'s CosmeticCatalogEntry> {
    let query = query.trim();
    snapshot
        .get(query)
        .or_else(|| fuzzy::best(query, snapshot.entries(), |entry| entry.name.as_str()))
}

fn suggestion(entry: &CosmeticCatalogEntry) -> Suggestion {
    Suggestion {
        name: format::truncate(&entry.label(), MAX_CHOICE_LEN),
        value: entry.id.clone(),
    }
}

impl<'a> WishlistService<'a> {
    pub fn new(users: &'a UserCache, catalog: &'a CatalogCache) -> Self {
        Self { users, catalog }
    }

    /// Resolves `query` against the catalog and adds the result to the wishlist.
    pub async fn add(&self, user_id: u64, query: &str) -> Result<AddOutcome, AppError> {
        let snapshot = self.catalog.snapshot();
        if snapshot.is_empty() {
            return Ok(AddOutcome::CatalogUnavailable);
        }

        let Some(entry) = resolve(&snapshot, query) else {
            return Ok(AddOutcome::NotFound);
        };

        let added = self.users.add_to_wishlist(user_id, &entry.id).await?;

        Ok(if added {
            AddOutcome::Added(entry.name.clone())
        } else {
            AddOutcome::AlreadyPresent(entry.name.clone())
        })
    }

    /// Resolves `query` against the user's own wishlist and removes the result.
    ///
    /// Ids that are no longer in the catalog are matched by id only.
    pub async fn remove(&self, user_id: u64, query: &str) -> Result<RemoveOutcome, AppError> {
        let Some(user) = self.users.get(user_id) else {
            return Ok(RemoveOutcome::NotFound);
        };
        let snapshot = self.catalog.snapshot();
        let query = query.trim();

        let exact = user
            .wishlist
            .iter()
            .find(|id| id.eq_ignore_ascii_case(query))
            .cloned();
        let target = match exact {
            Some(id) => Some(id),
            None => fuzzy::best(
                query,
                user.wishlist.iter().filter_map(|id| snapshot.get(id)),
                |entry| entry.name.as_str(),
            )
            .map(|entry| entry.id.clone()),
        };

        let Some(id) = target else {
            return Ok(RemoveOutcome::NotFound);
        };

        self.users.remove_from_wishlist(user_id, &id).await?;

        let name = snapshot.get(&id).map_or(id.clone(), |entry| entry.name.clone());
        Ok(RemoveOutcome::Removed(name))
    }

    pub async fn clear(&self, user_id: u64) -> Result<ClearOutcome, AppError> {
        self.users.clear_wishlist(user_id).await
    }

    /// Number of stored wishlist ids, including ones missing from the catalog.
    pub fn count(&self, user_id: u64) -> usize {
        self.users
            .get(user_id)
            .map_or(0, |user| user.wishlist.len())
    }

    /// Resolvable wishlist entries sorted by name. Stale ids are left out.
    pub fn view(&self, user_id: u64) -> Vec<CosmeticCatalogEntry> {
        let Some(user) = self.users.get(user_id) else {
            return Vec::new();
        };
        let snapshot = self.catalog.snapshot();

        let mut entries: Vec<CosmeticCatalogEntry> = user
            .wishlist
            .iter()
            .filter_map(|id| snapshot.get(id).cloned())
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    /// Autocomplete over the whole catalog.
    pub fn suggest_catalog(&self, query: &str) -> Vec<Suggestion> {
        let snapshot = self.catalog.snapshot();

        fuzzy::rank(
            query,
            snapshot.entries(),
            |entry| entry.name.as_str(),
            fuzzy::MAX_SUGGESTIONS,
        )
        .into_iter()
        .map(suggestion)
        .collect()
    }

    /// Autocomplete over the user's resolvable wishlist entries.
    pub fn suggest_wishlist(&self, user_id: u64, query: &str) -> Vec<Suggestion> {
        fuzzy::rank(
            query,
            self.view(user_id),
            |entry| entry.name.as_str(),
            fuzzy::MAX_SUGGESTIONS,
        )
        .iter()
        .map(suggestion)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cosmetic::CosmeticKind;
    use test_utils::builder::TestBuilder;

    fn entry(id: &str, name: &str, kind: CosmeticKind) -> CosmeticCatalogEntry {
        CosmeticCatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            shop_history: Vec::new(),
        }
    }

    async fn setup() -> (UserCache, CatalogCache) {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let catalog = CatalogCache::new();
        catalog.replace(vec![
            entry("CID_028", "Renegade Raider", CosmeticKind::Outfit),
            entry("CID_017", "Aerial Assault Trooper", CosmeticKind::Outfit),
            entry("Glider_ID_001", "Mako", CosmeticKind::Glider),
        ]);
        (UserCache::new(test.db.unwrap()), catalog)
    }

    #[tokio::test]
    async fn add_resolves_by_id_or_fuzzy_name() {
        let (users, catalog) = setup().await;
        let service = WishlistService::new(&users, &catalog);

        assert_eq!(
            service.add(1, "cid_028").await.unwrap(),
            AddOutcome::Added("Renegade Raider".to_string())
        );
        assert_eq!(
            service.add(1, "renegade raidr").await.unwrap(),
            AddOutcome::AlreadyPresent("Renegade Raider".to_string())
        );
        assert_eq!(service.add(1, "qqqqqqqq").await.unwrap(), AddOutcome::NotFound);
        assert!(users.get(1).unwrap().wishlist.contains("CID_028"));
    }

    #[tokio::test]
    async fn add_prefers_exact_name_over_longer_match() {
        let (users, catalog) = setup().await;
        catalog.replace(vec![
            entry("CID_DARK_REX", "Dark Rex", CosmeticKind::Outfit),
            entry("CID_REX", "Rex", CosmeticKind::Outfit),
            entry("Glider_ID_001", "Mako", CosmeticKind::Glider),
        ]);
        let service = WishlistService::new(&users, &catalog);

        assert_eq!(
            service.add(1, "rex").await.unwrap(),
            AddOutcome::Added("Rex".to_string())
        );
        assert_eq!(service.add(1, "a").await.unwrap(), AddOutcome::NotFound);
        assert_eq!(
            users.get(1).unwrap().wishlist.into_iter().collect::<Vec<_>>(),
            ["CID_REX"]
        );
    }

    #[tokio::test]
    async fn add_without_catalog_reports_unavailable() {
        let (users, _) = setup().await;
        let empty = CatalogCache::new();
        let service = WishlistService::new(&users, &empty);

        assert_eq!(
            service.add(1, "Mako").await.unwrap(),
            AddOutcome::CatalogUnavailable
        );
        assert!(users.get(1).is_none());
    }

    #[tokio::test]
    async fn remove_only_searches_own_wishlist() {
        let (users, catalog) = setup().await;
        let service = WishlistService::new(&users, &catalog);
        service.add(1, "Mako").await.unwrap();

        assert_eq!(
            service.remove(1, "Renegade Raider").await.unwrap(),
            RemoveOutcome::NotFound
        );
        assert_eq!(
            service.remove(1, "mako").await.unwrap(),
            RemoveOutcome::Removed("Mako".to_string())
        );
        assert!(users.get(1).unwrap().wishlist.is_empty());
    }

    #[tokio::test]
    async fn stale_ids_are_hidden_but_removable() {
        let (users, catalog) = setup().await;
        let service = WishlistService::new(&users, &catalog);
        service.add(1, "CID_017").await.unwrap();
        service.add(1, "Mako").await.unwrap();

        catalog.replace(vec![entry("Glider_ID_001", "Mako", CosmeticKind::Glider)]);

        let names: Vec<String> = service.view(1).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Mako"]);
        assert_eq!(
            service.remove(1, "CID_017").await.unwrap(),
            RemoveOutcome::Removed("CID_017".to_string())
        );
    }

    #[tokio::test]
    async fn suggestions_carry_cosmetic_ids() {
        let (users, catalog) = setup().await;
        let service = WishlistService::new(&users, &catalog);

        let suggestions = service.suggest_catalog("renegade");

        assert_eq!(suggestions[0].name, "Renegade Raider (Outfit)");
        assert_eq!(suggestions[0].value, "CID_028");
        assert!(service.suggest_wishlist(1, "renegade").is_empty());
    }
}
