//! Public snapshot written on publish and read by the viewer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::menu::{Category, Menu};
use super::translation::{MenuTranslation, TranslationMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedMenu {
    pub menu: PublishedMenuMeta,
    pub languages: Vec<String>,
    #[serde(rename = "defaultLanguage")]
    pub default_language: String,
    pub categories: Vec<Category>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedMenuMeta {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub menu_type: String,
    #[serde(default, skip_serializing_if = "TranslationMap::is_empty")]
    pub translations: TranslationMap<MenuTranslation>,
}

impl From<Menu> for PublishedMenu {
    fn from(menu: Menu) -> Self {
        Self {
            menu: PublishedMenuMeta {
                id: menu.id,
                name: menu.name,
                description: menu.description,
                menu_type: menu.menu_type,
                translations: menu.translations,
            },
            languages: menu.languages,
            default_language: menu.default_language,
            categories: menu.categories,
            last_updated: menu.last_updated.unwrap_or_else(Utc::now),
        }
    }
}

/// One row of the public listing. Independent of the full tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedMenuSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Storage path of a menu's public snapshot.
pub fn snapshot_path(menu_id: &str) -> String {
    format!("menus/menu-{}.json", menu_id)
}
