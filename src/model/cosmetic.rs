//! Cosmetic catalog and item shop models.
//!
//! The catalog source returns several differently shaped item kinds (battle royale items
//! carry a `name` and a `type`, jam tracks carry a `title`). They are normalized into a single
//! [`CosmeticCatalogEntry`] with a [`CosmeticKind`] discriminant when the catalog is ingested,
//! so consumers never re-inspect the raw shape.

use chrono::{DateTime, Utc};

/// Category of a cosmetic item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CosmeticKind {
    Outfit,
    Backpack,
    Pickaxe,
    Glider,
    Emote,
    Emoji,
    Spray,
    Wrap,
    Contrail,
    LoadingScreen,
    Music,
    Pet,
    Toy,
    Banner,
    Shoes,
    Track,
    Instrument,
    Car,
    /// Any battle royale type tag not listed above, kept verbatim.
    Other(String),
}

impl CosmeticKind {
    /// Resolves a battle royale `type.value` tag.
    pub fn from_br_type(value: &str) -> Self {
        match value {
            "outfit" => Self::Outfit,
            "backpack" => Self::Backpack,
            "pickaxe" => Self::Pickaxe,
            "glider" => Self::Glider,
            "emote" => Self::Emote,
            "emoji" => Self::Emoji,
            "spray" => Self::Spray,
            "wrap" => Self::Wrap,
            "contrail" => Self::Contrail,
            "loadingscreen" => Self::LoadingScreen,
            "music" => Self::Music,
            "pet" | "petcarrier" => Self::Pet,
            "toy" => Self::Toy,
            "banner" => Self::Banner,
            "shoe" | "shoes" => Self::Shoes,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Outfit => "Outfit",
            Self::Backpack => "Back Bling",
            Self::Pickaxe => "Harvesting Tool",
            Self::Glider => "Glider",
            Self::Emote => "Emote",
            Self::Emoji => "Emoticon",
            Self::Spray => "Spray",
            Self::Wrap => "Wrap",
            Self::Contrail => "Contrail",
            Self::LoadingScreen => "Loading Screen",
            Self::Music => "Music",
            Self::Pet => "Pet",
            Self::Toy => "Toy",
            Self::Banner => "Banner",
            Self::Shoes => "Kicks",
            Self::Track => "Jam Track",
            Self::Instrument => "Instrument",
            Self::Car => "Car",
            Self::Other(tag) => tag,
        }
    }
}

/// A single cosmetic from the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmeticCatalogEntry {
    pub id: String,
    pub name: String,
    pub kind: CosmeticKind,
    /// Dates the item appeared in the shop, oldest first. Empty if never sold.
    pub shop_history: Vec<DateTime<Utc>>,
}

impl CosmeticCatalogEntry {
    /// Most recent shop appearance.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.shop_history.iter().max().copied()
    }

    /// Label used in autocomplete suggestions, e.g. `Renegade Raider (Outfit)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind.display_name())
    }
}

/// A cosmetic purchasable in the current item shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopEntry {
    pub id: String,
    pub name: String,
}

/// An Epic Games account found by display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicAccount {
    pub id: String,
    pub display_name: String,
}
