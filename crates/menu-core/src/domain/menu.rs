//! Canonical menu tree: menu -> categories -> items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::translation::{CategoryTranslation, ItemTranslation, MenuTranslation, TranslationMap};
use crate::language::DEFAULT_LANGUAGE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub menu_type: String,
    /// Languages a snapshot carries translations for, default first.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "TranslationMap::is_empty")]
    pub translations: TranslationMap<MenuTranslation>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Menu {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            menu_type: String::new(),
            languages: vec![default_language()],
            default_language: default_language(),
            categories: Vec::new(),
            last_updated: None,
            translations: TranslationMap::new(),
        }
    }

    /// Stable ascending sort of categories and of the items inside each.
    pub fn sort(&mut self) {
        self.categories.sort_by_key(|c| c.order);
        for category in &mut self.categories {
            category.items.sort_by_key(|i| i.order);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub header: Option<String>,
    pub description: Option<String>,
    pub footer: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default, skip_serializing_if = "TranslationMap::is_empty")]
    pub translations: TranslationMap<CategoryTranslation>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            header: None,
            description: None,
            footer: None,
            order,
            items: Vec::new(),
            addons: Vec::new(),
            extras: Vec::new(),
            translations: TranslationMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "item_name")]
    pub name: String,
    #[serde(rename = "item_description")]
    pub description: Option<String>,
    /// Zero means the price comes from the options.
    #[serde(rename = "item_price")]
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ItemImages>,
    #[serde(default, skip_serializing_if = "TranslationMap::is_empty")]
    pub translations: TranslationMap<ItemTranslation>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            order,
            flags: ItemFlags::default(),
            allergies: Vec::new(),
            options: Vec::new(),
            extras: Vec::new(),
            addons: Vec::new(),
            image: None,
            translations: TranslationMap::new(),
        }
    }

    pub fn is_priced_by_options(&self) -> bool {
        self.price == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFlags {
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub spicy: bool,
}

fn active_by_default() -> bool {
    true
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self {
            active: true,
            vegetarian: false,
            vegan: false,
            spicy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOption {
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImages {
    pub small_url: String,
    pub large_url: String,
}
