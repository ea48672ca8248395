pub mod prelude;

pub mod guild_settings;
pub mod user;
pub mod user_wishlist_item;
