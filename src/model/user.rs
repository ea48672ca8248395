//! User domain models.
//!
//! A user record is created the first time an interaction references a Discord user and
//! is never deleted. It carries the optional linked Epic account and the set of cosmetic
//! ids the user wants to be notified about.

use std::collections::BTreeSet;

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Linked-account and wishlist state for a single Discord user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserRecord {
    /// Discord ID of the user.
    pub id: u64,
    /// Epic Games account ID, if the user has linked one.
    pub linked_account_id: Option<String>,
    /// Cosmetic ids the user wants shop notifications for.
    pub wishlist: BTreeSet<String>,
}

impl UserRecord {
    /// Creates an empty record for a user that has never been stored.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Converts a user row and its wishlist rows into a domain model at the repository
    /// boundary.
    ///
    /// # Arguments
    /// - `entity` - The user row
    /// - `items` - Wishlist rows belonging to the user
    ///
    /// # Returns
    /// - `Ok(UserRecord)` - The converted record
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored Discord ID is not numeric
    pub fn from_entity(
        entity: entity::user::Model,
        items: Vec<entity::user_wishlist_item::Model>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            id: parse_u64_from_string(entity.discord_id)?,
            linked_account_id: entity.epic_account_id,
            wishlist: items.into_iter().map(|item| item.cosmetic_id).collect(),
        })
    }
}

/// Outcome of clearing a user's wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The wishlist held this many items and is now empty.
    Cleared(usize),
    /// The wishlist was already empty; nothing was written.
    NothingToClear,
}
