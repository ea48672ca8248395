//! Shared state handed to every interaction handler.
//!
//! Created once in `main` after the database is migrated and the user cache is populated.
//! Every field is cheap to clone: the connection is a pool and the rest are `Arc`s.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    cache::{catalog::CatalogCache, user::UserCache},
    service::fortnite::AccountLookup,
};

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for repositories that are not fronted by a cache.
    pub db: DatabaseConnection,

    /// Link and wishlist state of every known user.
    pub users: Arc<UserCache>,

    /// Latest cosmetic catalog snapshot, refreshed by the scheduler.
    pub catalog: Arc<CatalogCache>,

    /// Epic account lookup used by `/link`.
    pub accounts: Arc<dyn AccountLookup>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        users: Arc<UserCache>,
        catalog: Arc<CatalogCache>,
        accounts: Arc<dyn AccountLookup>,
    ) -> Self {
        Self {
            db,
            users,
            catalog,
            accounts,
        }
    }
}
