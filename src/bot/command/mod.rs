//! Slash commands and their autocomplete handlers.
//!
//! [`registry`] wires every handler into the dispatcher. Autocomplete handlers are routed
//! by the name of the focused option, so `cosmetic` and `name` share the catalog handler
//! and `wishlisted` only ever offers the invoking user's own items.

pub mod autocomplete;
pub mod cosmetic;
pub mod link;
pub mod settings;
pub mod wishlist;

use crate::bot::{
    command::{
        autocomplete::{CatalogAutocomplete, WishlistAutocomplete},
        cosmetic::CosmeticCommand,
        link::{LinkCommand, UnlinkCommand},
        settings::SettingsCommand,
        wishlist::WishlistCommand,
    },
    dispatch::Registry,
};

/// Builds the registry of every command the bot serves.
pub fn registry() -> Registry {
    Registry::new()
        .command("link", LinkCommand)
        .command("unlink", UnlinkCommand)
        .command("wishlist", WishlistCommand)
        .command("cosmetic", CosmeticCommand)
        .command("settings", SettingsCommand)
        .autocomplete("cosmetic", CatalogAutocomplete)
        .autocomplete("name", CatalogAutocomplete)
        .autocomplete("wishlisted", WishlistAutocomplete)
}
