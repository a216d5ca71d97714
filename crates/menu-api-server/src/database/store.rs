//! Content-management store (port)

use async_trait::async_trait;

use super::models::{CategoryRecord, EntityKind, ItemRecord, MenuRecord, TranslationRecord};
use crate::utils::error::ServiceError;

#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Cheap round-trip used by the readiness check.
    async fn ping(&self) -> Result<(), ServiceError>;

    async fn get_menu(&self, id: &str) -> Result<Option<MenuRecord>, ServiceError>;
    async fn get_category(&self, id: &str) -> Result<Option<CategoryRecord>, ServiceError>;
    async fn get_item(&self, id: &str) -> Result<Option<ItemRecord>, ServiceError>;
    async fn list_menus(&self) -> Result<Vec<MenuRecord>, ServiceError>;

    async fn save_menu(&self, menu: &MenuRecord) -> Result<(), ServiceError>;
    async fn save_category(&self, category: &CategoryRecord) -> Result<(), ServiceError>;
    async fn save_item(&self, item: &ItemRecord) -> Result<(), ServiceError>;

    async fn get_translation(
        &self,
        kind: EntityKind,
        entity_id: &str,
        language: &str,
    ) -> Result<Option<TranslationRecord>, ServiceError>;

    async fn save_translation(
        &self,
        kind: EntityKind,
        entity_id: &str,
        record: &TranslationRecord,
    ) -> Result<(), ServiceError>;
}
