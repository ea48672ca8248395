pub use super::guild_settings::Entity as GuildSettings;
pub use super::user::Entity as User;
pub use super::user_wishlist_item::Entity as UserWishlistItem;
