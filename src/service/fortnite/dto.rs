//! Response bodies of the Fortnite-API endpoints we consume.
//!
//! Each item family comes back in its own array with its own shape. Conversion into
//! [`CosmeticCatalogEntry`] happens here, once, so the rest of the bot only ever sees the
//! tagged [`CosmeticKind`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::cosmetic::{CosmeticCatalogEntry, CosmeticKind, EpicAccount, ShopEntry};

/// Common `{ status, data }` envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct TypeTag {
    pub value: String,
}

/// Items carrying a `name` and a `type` tag (battle royale, instruments, cars).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedItemDto {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TypeTag>,
    #[serde(default)]
    pub shop_history: Option<Vec<DateTime<Utc>>>,
}

/// Jam tracks expose `title` instead of `name` and have no type tag.
#[derive(Debug, Deserialize)]
pub struct TrackDto {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CosmeticsDto {
    pub br: Vec<NamedItemDto>,
    pub tracks: Vec<TrackDto>,
    pub instruments: Vec<NamedItemDto>,
    pub cars: Vec<NamedItemDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShopEntryDto {
    pub br_items: Vec<NamedItemDto>,
    pub tracks: Vec<TrackDto>,
    pub instruments: Vec<NamedItemDto>,
    pub cars: Vec<NamedItemDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShopDto {
    pub entries: Vec<ShopEntryDto>,
}

#[derive(Debug, Deserialize)]
pub struct AccountDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StatsDto {
    pub account: Option<AccountDto>,
}

impl NamedItemDto {
    fn into_entry(self, default_kind: CosmeticKind) -> Option<CosmeticCatalogEntry> {
        let name = self.name.filter(|name| !name.trim().is_empty())?;
        let kind = match (&default_kind, self.kind) {
            (CosmeticKind::Other(_), Some(tag)) => CosmeticKind::from_br_type(&tag.value),
            _ => default_kind,
        };

        let mut shop_history = self.shop_history.unwrap_or_default();
        shop_history.sort();

        Some(CosmeticCatalogEntry {
            id: self.id,
            name,
            kind,
            shop_history,
        })
    }
}

impl TrackDto {
    fn into_entry(self) -> Option<CosmeticCatalogEntry> {
        let name = self.title.filter(|title| !title.trim().is_empty())?;
        Some(CosmeticCatalogEntry {
            id: self.id,
            name,
            kind: CosmeticKind::Track,
            shop_history: Vec::new(),
        })
    }
}

/// Flattens every item family into tagged catalog entries. Nameless items are skipped.
pub fn catalog_entries(dto: CosmeticsDto) -> Vec<CosmeticCatalogEntry> {
    let untagged = || CosmeticKind::Other(String::new());

    dto.br
        .into_iter()
        .filter_map(|item| item.into_entry(untagged()))
        .chain(dto.tracks.into_iter().filter_map(TrackDto::into_entry))
        .chain(
            dto.instruments
                .into_iter()
                .filter_map(|item| item.into_entry(CosmeticKind::Instrument)),
        )
        .chain(
            dto.cars
                .into_iter()
                .filter_map(|item| item.into_entry(CosmeticKind::Car)),
        )
        .collect()
}

/// Lists every purchasable cosmetic of the shop once, in listing order.
pub fn shop_entries(dto: ShopDto) -> Vec<ShopEntry> {
    let mut seen = std::collections::HashSet::new();
    let mut entries = Vec::new();

    for entry in dto.entries {
        let named = entry
            .br_items
            .into_iter()
            .chain(entry.instruments)
            .chain(entry.cars)
            .filter_map(|item| Some((item.id, item.name?)));
        let tracks = entry
            .tracks
            .into_iter()
            .filter_map(|track| Some((track.id, track.title?)));

        for (id, name) in named.chain(tracks) {
            if seen.insert(id.clone()) {
                entries.push(ShopEntry { id, name });
            }
        }
    }

    entries
}

impl From<AccountDto> for EpicAccount {
    fn from(dto: AccountDto) -> Self {
        Self {
            id: dto.id,
            display_name: dto.name,
        }
    }
}
