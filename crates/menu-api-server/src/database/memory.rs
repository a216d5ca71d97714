//! In-process store for development runs and tests

use async_trait::async_trait;
use dashmap::DashMap;

use super::models::{CategoryRecord, EntityKind, ItemRecord, MenuRecord, TranslationRecord};
use super::store::MenuStore;
use crate::utils::error::ServiceError;

#[derive(Default)]
pub struct InMemoryMenuStore {
    menus: DashMap<String, MenuRecord>,
    categories: DashMap<String, CategoryRecord>,
    items: DashMap<String, ItemRecord>,
    translations: DashMap<(EntityKind, String, String), TranslationRecord>,
}

impl InMemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuStore for InMemoryMenuStore {
    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn get_menu(&self, id: &str) -> Result<Option<MenuRecord>, ServiceError> {
        Ok(self.menus.get(id).map(|r| r.value().clone()))
    }

    async fn get_category(&self, id: &str) -> Result<Option<CategoryRecord>, ServiceError> {
        Ok(self.categories.get(id).map(|r| r.value().clone()))
    }

    async fn get_item(&self, id: &str) -> Result<Option<ItemRecord>, ServiceError> {
        Ok(self.items.get(id).map(|r| r.value().clone()))
    }

    async fn list_menus(&self) -> Result<Vec<MenuRecord>, ServiceError> {
        let mut menus: Vec<MenuRecord> = self.menus.iter().map(|r| r.value().clone()).collect();
        menus.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(menus)
    }

    async fn save_menu(&self, menu: &MenuRecord) -> Result<(), ServiceError> {
        self.menus.insert(menu.id.clone(), menu.clone());
        Ok(())
    }

    async fn save_category(&self, category: &CategoryRecord) -> Result<(), ServiceError> {
        self.categories.insert(category.id.clone(), category.clone());
        Ok(())
    }

    async fn save_item(&self, item: &ItemRecord) -> Result<(), ServiceError> {
        self.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn get_translation(
        &self,
        kind: EntityKind,
        entity_id: &str,
        language: &str,
    ) -> Result<Option<TranslationRecord>, ServiceError> {
        let key = (kind, entity_id.to_string(), language.to_string());
        Ok(self.translations.get(&key).map(|r| r.value().clone()))
    }

    async fn save_translation(
        &self,
        kind: EntityKind,
        entity_id: &str,
        record: &TranslationRecord,
    ) -> Result<(), ServiceError> {
        let key = (kind, entity_id.to_string(), record.language.clone());
        self.translations.insert(key, record.clone());
        Ok(())
    }
}
