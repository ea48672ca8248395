//! In-memory user cache backed by the user repository.
//!
//! Commands read link and wishlist state synchronously through [`UserCache::get`]. Every
//! mutation writes to the database first and only touches the in-memory map once the write
//! succeeded, so a storage failure leaves the cache exactly as it was. Mutations of the same
//! user run one at a time, so the map never drifts from what storage holds.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use sea_orm::DatabaseConnection;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::{
    data::user::UserRepository,
    error::AppError,
    model::user::{ClearOutcome, UserRecord},
};

pub struct UserCache {
    db: DatabaseConnection,
    users: RwLock<HashMap<u64, UserRecord>>,
    write_locks: Mutex<HashMap<u64, Arc<AsyncMutex<()>>>>,
}

impl UserCache {
    /// Creates an empty cache. Call [`UserCache::populate`] before serving commands.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            users: RwLock::new(HashMap::new()),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Loads every stored user into memory, replacing current contents.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of users loaded
    /// - `Err(AppError)` - Storage unavailable; callers at startup must abort
    pub async fn populate(&self) -> Result<usize, AppError> {
        let users = UserRepository::new(&self.db).get_all().await?;
        let count = users.len();

        let map = users.into_iter().map(|user| (user.id, user)).collect();
        *self.users.write().unwrap_or_else(PoisonError::into_inner) = map;

        tracing::info!("Loaded {} users into cache", count);

        Ok(count)
    }

    /// Returns the cached record of a user, or `None` if the user was never stored.
    pub fn get(&self, user_id: u64) -> Option<UserRecord> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .cloned()
    }

    /// Returns a copy of every cached record.
    pub fn all(&self) -> Vec<UserRecord> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Links (or with `None`, unlinks) an Epic account.
    pub async fn set_linked_account(
        &self,
        user_id: u64,
        account_id: Option<String>,
    ) -> Result<(), AppError> {
        let _guard = self.lock_user(user_id).await;

        UserRepository::new(&self.db)
            .set_epic_account(user_id, account_id.clone())
            .await?;

        self.with_entry(user_id, |user| user.linked_account_id = account_id);

        Ok(())
    }

    /// Adds a cosmetic to the user's wishlist. Adding a present id is a no-op.
    ///
    /// # Returns
    /// - `Ok(true)` - The id was added
    /// - `Ok(false)` - The id was already on the wishlist
    pub async fn add_to_wishlist(&self, user_id: u64, cosmetic_id: &str) -> Result<bool, AppError> {
        let _guard = self.lock_user(user_id).await;

        let inserted = UserRepository::new(&self.db)
            .add_wishlist_item(user_id, cosmetic_id)
            .await?;

        self.with_entry(user_id, |user| {
            user.wishlist.insert(cosmetic_id.to_string());
        });

        Ok(inserted)
    }

    /// Removes a cosmetic from the user's wishlist. Removing an absent id is a no-op.
    ///
    /// # Returns
    /// - `Ok(true)` - The id was removed
    /// - `Ok(false)` - The id was not on the wishlist
    pub async fn remove_from_wishlist(
        &self,
        user_id: u64,
        cosmetic_id: &str,
    ) -> Result<bool, AppError> {
        let _guard = self.lock_user(user_id).await;

        let removed = UserRepository::new(&self.db)
            .remove_wishlist_item(user_id, cosmetic_id)
            .await?;

        if let Some(user) = self
            .users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&user_id)
        {
            user.wishlist.remove(cosmetic_id);
        }

        Ok(removed)
    }

    /// Empties the user's wishlist.
    ///
    /// # Returns
    /// - `Ok(ClearOutcome::Cleared(n))` - `n` items were removed
    /// - `Ok(ClearOutcome::NothingToClear)` - Already empty; storage was not touched
    pub async fn clear_wishlist(&self, user_id: u64) -> Result<ClearOutcome, AppError> {
        let _guard = self.lock_user(user_id).await;

        let count = self.get(user_id).map_or(0, |user| user.wishlist.len());
        if count == 0 {
            return Ok(ClearOutcome::NothingToClear);
        }

        UserRepository::new(&self.db).clear_wishlist(user_id).await?;

        self.with_entry(user_id, |user| user.wishlist.clear());

        Ok(ClearOutcome::Cleared(count))
    }

    /// Waits for the user's other mutations to finish and holds off new ones until the
    /// guard drops.
    async fn lock_user(&self, user_id: u64) -> OwnedMutexGuard<()> {
        let lock = self
            .write_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id)
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    fn with_entry(&self, user_id: u64, update: impl FnOnce(&mut UserRecord)) {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        update(
            users
                .entry(user_id)
                .or_insert_with(|| UserRecord::new(user_id)),
        );
    }
}
