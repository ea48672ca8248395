//! Business logic between the bot handlers and the caches, repositories and APIs.

pub mod fortnite;
pub mod fuzzy;
pub mod notification;
pub mod wishlist;
