//! Public listing of published menus.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use menu_core::resolver::{resolve, MenuField};
use menu_core::transform::transform_lenient;
use menu_core::{snapshot_path, Menu, MenuError, PublishedMenuSummary};
use tracing::{debug, warn};

use crate::database::{MenuRecord, MenuStore};
use crate::storage::ObjectStorage;
use crate::utils::error::ServiceError;

pub struct ListingService {
    store: Arc<dyn MenuStore>,
    storage: Arc<dyn ObjectStorage>,
    default_language: String,
    concurrency: usize,
}

impl ListingService {
    pub fn new(
        store: Arc<dyn MenuStore>,
        storage: Arc<dyn ObjectStorage>,
        default_language: impl Into<String>,
        concurrency: usize,
    ) -> Self {
        Self {
            store,
            storage,
            default_language: default_language.into(),
            concurrency: concurrency.max(1),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Every published menu, localized into `lang` where a snapshot
    /// carries a translation. Order follows the store listing.
    pub async fn list(&self, lang: &str) -> Result<Vec<PublishedMenuSummary>, ServiceError> {
        let published: Vec<MenuRecord> = self
            .store
            .list_menus()
            .await?
            .into_iter()
            .filter(|menu| menu.published_url.is_some())
            .collect();

        debug!("Listing {} published menus in {}", published.len(), lang);

        let summaries = stream::iter(published)
            .map(|record| self.summarize(record, lang))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;
        Ok(summaries)
    }

    async fn summarize(&self, record: MenuRecord, lang: &str) -> PublishedMenuSummary {
        let mut summary = PublishedMenuSummary {
            url: record.published_url.clone().unwrap_or_default(),
            id: record.id,
            name: record.name,
            description: record.description,
            last_updated: record.last_updated,
        };

        match self.load_snapshot(&summary.id).await {
            Ok(Some(menu)) => {
                let default = if menu.default_language.is_empty() {
                    self.default_language.as_str()
                } else {
                    menu.default_language.as_str()
                };
                summary.name = resolve(&menu, MenuField::Name, lang, default);
                summary.description = resolve(&menu, MenuField::Description, lang, default);
                summary.last_updated = menu.last_updated.or(summary.last_updated);
            }
            Ok(None) => warn!("Snapshot of published menu {} is missing", summary.id),
            Err(e) => warn!("Failed to read snapshot of menu {}: {}", summary.id, e),
        }
        summary
    }

    async fn load_snapshot(&self, menu_id: &str) -> Result<Option<Menu>, ServiceError> {
        let Some(bytes) = self.storage.get(&snapshot_path(menu_id)).await? else {
            return Ok(None);
        };
        let raw: serde_json::Value = serde_json::from_slice(&bytes).map_err(MenuError::from)?;
        let (menu, _) = transform_lenient(&raw)?;
        Ok(Some(menu))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryMenuStore;
    use crate::storage::InMemoryObjectStorage;
    use serde_json::json;

    fn record(id: &str, published: bool) -> MenuRecord {
        MenuRecord {
            id: id.to_string(),
            name: format!("Menu {}", id),
            description: "Canonical".to_string(),
            menu_type: "restaurant".to_string(),
            category_ids: Vec::new(),
            last_updated: None,
            published_url: published.then(|| format!("memory://public/menus/menu-{}.json", id)),
        }
    }

    fn snapshot(id: &str, es_name: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "menu": {
                "id": id,
                "name": format!("Menu {}", id),
                "description": "Canonical",
                "type": "restaurant",
                "translations": { "es": { "name": es_name } }
            },
            "languages": ["en", "es"],
            "defaultLanguage": "en",
            "categories": [],
            "lastUpdated": "2024-05-01T12:00:00Z"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_localizes_and_isolates_failures() {
        let store = Arc::new(InMemoryMenuStore::new());
        let storage = Arc::new(InMemoryObjectStorage::new());

        for (id, published) in [("a", true), ("b", true), ("c", false), ("d", true)] {
            store.save_menu(&record(id, published)).await.unwrap();
        }
        storage
            .put("menus/menu-a.json", snapshot("a", "Menú A"), "application/json")
            .await
            .unwrap();
        storage
            .put("menus/menu-b.json", b"{not json".to_vec(), "application/json")
            .await
            .unwrap();
        // d is published but its snapshot is gone

        let svc = ListingService::new(store, storage, "en", 2);
        let list = svc.list("es").await.unwrap();

        let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
        assert_eq!(list[0].name, "Menú A");
        assert_eq!(list[0].description, "Canonical");
        assert!(list[0].last_updated.is_some());
        assert_eq!(list[1].name, "Menu b");
        assert_eq!(list[2].name, "Menu d");
        assert_eq!(list[2].url, "memory://public/menus/menu-d.json");
    }

    #[tokio::test]
    async fn test_default_language_uses_canonical_text() {
        let store = Arc::new(InMemoryMenuStore::new());
        let storage = Arc::new(InMemoryObjectStorage::new());
        store.save_menu(&record("a", true)).await.unwrap();
        storage
            .put("menus/menu-a.json", snapshot("a", "Menú A"), "application/json")
            .await
            .unwrap();

        let list = ListingService::new(store, storage, "en", 0)
            .list("en")
            .await
            .unwrap();
        assert_eq!(list[0].name, "Menu a");
    }
}
