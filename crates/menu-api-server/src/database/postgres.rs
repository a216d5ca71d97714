//! PostgreSQL document store: one JSONB row per record

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::types::Json;
use tracing::{debug, error};

use super::models::{CategoryRecord, EntityKind, ItemRecord, MenuRecord, TranslationRecord};
use super::pool::DbPool;
use super::store::MenuStore;
use crate::utils::error::ServiceError;

const SCHEMA: &str = include_str!("../../migrations/0001_menu_documents.sql");

pub struct PgMenuStore {
    pool: DbPool,
}

impl PgMenuStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), ServiceError> {
        sqlx::raw_sql(SCHEMA).execute(self.pool.get_pool()).await?;
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        kind: EntityKind,
        id: &str,
    ) -> Result<Option<T>, ServiceError> {
        let row: Option<(Json<serde_json::Value>,)> = sqlx::query_as(
            "SELECT data FROM menu_documents WHERE collection = $1 AND id = $2",
        )
        .bind(kind.collection())
        .bind(id)
        .fetch_optional(self.pool.get_pool())
        .await
        .map_err(|e| {
            error!("Database error loading {}/{}: {}", kind.collection(), id, e);
            ServiceError::from(e)
        })?;

        row.map(|(Json(data),)| decode(kind, id, data)).transpose()
    }

    async fn upsert<T: Serialize + Sync>(
        &self,
        kind: EntityKind,
        id: &str,
        record: &T,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"INSERT INTO menu_documents (collection, id, data, updated_at)
               VALUES ($1, $2, $3, now())
               ON CONFLICT (collection, id)
               DO UPDATE SET data = EXCLUDED.data, updated_at = now()"#,
        )
        .bind(kind.collection())
        .bind(id)
        .bind(Json(record))
        .execute(self.pool.get_pool())
        .await?;

        debug!("Saved {}/{}", kind.collection(), id);
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(
    kind: EntityKind,
    id: &str,
    data: serde_json::Value,
) -> Result<T, ServiceError> {
    serde_json::from_value(data).map_err(|e| {
        ServiceError::Database(format!(
            "Corrupt {} record '{}': {}",
            kind.collection(),
            id,
            e
        ))
    })
}

#[async_trait]
impl MenuStore for PgMenuStore {
    async fn ping(&self) -> Result<(), ServiceError> {
        sqlx::query("SELECT 1").execute(self.pool.get_pool()).await?;
        Ok(())
    }

    async fn get_menu(&self, id: &str) -> Result<Option<MenuRecord>, ServiceError> {
        self.fetch(EntityKind::Menu, id).await
    }

    async fn get_category(&self, id: &str) -> Result<Option<CategoryRecord>, ServiceError> {
        self.fetch(EntityKind::Category, id).await
    }

    async fn get_item(&self, id: &str) -> Result<Option<ItemRecord>, ServiceError> {
        self.fetch(EntityKind::Item, id).await
    }

    async fn list_menus(&self) -> Result<Vec<MenuRecord>, ServiceError> {
        let rows: Vec<(String, Json<serde_json::Value>)> = sqlx::query_as(
            "SELECT id, data FROM menu_documents WHERE collection = $1 ORDER BY id",
        )
        .bind(EntityKind::Menu.collection())
        .fetch_all(self.pool.get_pool())
        .await?;

        rows.into_iter()
            .map(|(id, Json(data))| decode(EntityKind::Menu, &id, data))
            .collect()
    }

    async fn save_menu(&self, menu: &MenuRecord) -> Result<(), ServiceError> {
        self.upsert(EntityKind::Menu, &menu.id, menu).await
    }

    async fn save_category(&self, category: &CategoryRecord) -> Result<(), ServiceError> {
        self.upsert(EntityKind::Category, &category.id, category).await
    }

    async fn save_item(&self, item: &ItemRecord) -> Result<(), ServiceError> {
        self.upsert(EntityKind::Item, &item.id, item).await
    }

    async fn get_translation(
        &self,
        kind: EntityKind,
        entity_id: &str,
        language: &str,
    ) -> Result<Option<TranslationRecord>, ServiceError> {
        let row: Option<(Json<TranslationRecord>,)> = sqlx::query_as(
            r#"SELECT data FROM menu_translations
               WHERE collection = $1 AND entity_id = $2 AND language = $3"#,
        )
        .bind(kind.collection())
        .bind(entity_id)
        .bind(language)
        .fetch_optional(self.pool.get_pool())
        .await?;

        Ok(row.map(|(Json(record),)| record))
    }

    async fn save_translation(
        &self,
        kind: EntityKind,
        entity_id: &str,
        record: &TranslationRecord,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"INSERT INTO menu_translations (collection, entity_id, language, data, updated_at)
               VALUES ($1, $2, $3, $4, now())
               ON CONFLICT (collection, entity_id, language)
               DO UPDATE SET data = EXCLUDED.data, updated_at = now()"#,
        )
        .bind(kind.collection())
        .bind(entity_id)
        .bind(&record.language)
        .bind(Json(record))
        .execute(self.pool.get_pool())
        .await?;

        Ok(())
    }
}
