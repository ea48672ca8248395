//! Cross-referencing the item shop against every user's wishlist.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::model::{cosmetic::ShopEntry, user::UserRecord};

/// Cosmetics from a user's wishlist that are in today's shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistMatch {
    pub user_id: u64,
    /// Matched display names, deduplicated and sorted.
    pub names: Vec<String>,
}

/// Matches each user's wishlist against the shop.
///
/// Wishlisted ids that are not in the shop are ignored. Users without any match are
/// omitted. The result is ordered by user id.
pub fn match_users(shop: &[ShopEntry], users: &[UserRecord]) -> Vec<WishlistMatch> {
    let shop_names: HashMap<&str, &str> = shop
        .iter()
        .map(|entry| (entry.id.as_str(), entry.name.as_str()))
        .collect();

    let mut matches: Vec<WishlistMatch> = users
        .iter()
        .filter_map(|user| {
            let names: BTreeSet<&str> = user
                .wishlist
                .iter()
                .filter_map(|id| shop_names.get(id.as_str()).copied())
                .collect();

            (!names.is_empty()).then(|| WishlistMatch {
                user_id: user.id,
                names: names.into_iter().map(str::to_string).collect(),
            })
        })
        .collect();

    matches.sort_by_key(|m| m.user_id);
    matches
}

/// Matches the shop against every wishlist and groups the matches by guild.
///
/// A user appears under every guild in `guild_members` they belong to. Guilds without a
/// matching member are absent from the result.
///
/// # Arguments
/// - `shop` - Today's shop entries
/// - `users` - Every known user
/// - `guild_members` - Member ids of each guild to notify
pub fn match_shop_to_wishlists(
    shop: &[ShopEntry],
    users: &[UserRecord],
    guild_members: &HashMap<u64, HashSet<u64>>,
) -> BTreeMap<u64, Vec<WishlistMatch>> {
    let matches = match_users(shop, users);

    guild_members
        .iter()
        .filter_map(|(&guild_id, members)| {
            let guild_matches: Vec<WishlistMatch> = matches
                .iter()
                .filter(|m| members.contains(&m.user_id))
                .cloned()
                .collect();

            (!guild_matches.is_empty()).then_some((guild_id, guild_matches))
        })
        .collect()
}
