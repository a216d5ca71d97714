//! Editable records as stored in the content-management store

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use menu_core::{Addon, Extra, ItemFlags, ItemImages, PriceOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Menu,
    Category,
    Item,
}

impl EntityKind {
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Menu => "menus",
            EntityKind::Category => "categories",
            EntityKind::Item => "items",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub menu_type: String,
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Set while a public snapshot exists
    #[serde(default)]
    pub published_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub item_ids: Vec<String>,
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub flags: ItemFlags,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub options: Vec<PriceOption>,
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    #[serde(default)]
    pub image: Option<ItemImages>,
}

/// Stored translation sub-record of one entity in one language.
///
/// Array labels are keyed by their index in the canonical array
/// (`{"0": "Petit", "2": "Grand"}`); gaps are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub addons: BTreeMap<String, String>,
    pub translated_at: Option<DateTime<Utc>>,
}
