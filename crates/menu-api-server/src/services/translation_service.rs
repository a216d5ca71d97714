//! On-demand translation of menus, categories and items.
//!
//! All translatable text of one entity is sent upstream in a single
//! batch. The result is stored per (entity, language); a stored record
//! short-circuits later calls, so repeating a request never hits the
//! translation API twice.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use menu_core::language::normalize_language;
use menu_core::MenuError;
use tracing::{debug, info};

use super::translation_client::TranslationApi;
use crate::config::LanguagesConfig;
use crate::database::{EntityKind, MenuStore, TranslationRecord};
use crate::utils::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Name,
    Description,
    Header,
    Footer,
    Option(usize),
    Extra(usize),
    Addon(usize),
}

pub struct TranslationService {
    store: Arc<dyn MenuStore>,
    api: Arc<dyn TranslationApi>,
    languages: LanguagesConfig,
}

impl TranslationService {
    pub fn new(
        store: Arc<dyn MenuStore>,
        api: Arc<dyn TranslationApi>,
        languages: LanguagesConfig,
    ) -> Self {
        Self {
            store,
            api,
            languages,
        }
    }

    pub async fn translate_item(
        &self,
        item_id: &str,
        target: &str,
    ) -> Result<TranslationRecord, ServiceError> {
        let target = self.validate(item_id, target)?;
        if let Some(existing) = self.existing(EntityKind::Item, item_id, &target).await? {
            return Ok(existing);
        }

        let item = self
            .store
            .get_item(item_id)
            .await?
            .ok_or_else(|| MenuError::ItemNotFound(item_id.to_string()))?;

        let mut segments = vec![(Slot::Name, item.name)];
        segments.extend(item.description.map(|d| (Slot::Description, d)));
        segments.extend(item.options.into_iter().enumerate().map(|(i, o)| (Slot::Option(i), o.label)));
        segments.extend(item.extras.into_iter().enumerate().map(|(i, e)| (Slot::Extra(i), e.label)));
        segments.extend(item.addons.into_iter().enumerate().map(|(i, a)| (Slot::Addon(i), a.label)));

        self.translate_and_store(EntityKind::Item, item_id, &target, segments)
            .await
    }

    pub async fn translate_category(
        &self,
        category_id: &str,
        target: &str,
    ) -> Result<TranslationRecord, ServiceError> {
        let target = self.validate(category_id, target)?;
        if let Some(existing) = self
            .existing(EntityKind::Category, category_id, &target)
            .await?
        {
            return Ok(existing);
        }

        let category = self
            .store
            .get_category(category_id)
            .await?
            .ok_or_else(|| MenuError::CategoryNotFound(category_id.to_string()))?;

        let mut segments = vec![(Slot::Name, category.name)];
        segments.extend(category.description.map(|d| (Slot::Description, d)));
        segments.extend(category.header.map(|h| (Slot::Header, h)));
        segments.extend(category.footer.map(|f| (Slot::Footer, f)));
        segments.extend(category.extras.into_iter().enumerate().map(|(i, e)| (Slot::Extra(i), e.label)));
        segments.extend(category.addons.into_iter().enumerate().map(|(i, a)| (Slot::Addon(i), a.label)));

        self.translate_and_store(EntityKind::Category, category_id, &target, segments)
            .await
    }

    pub async fn translate_menu(
        &self,
        menu_id: &str,
        target: &str,
    ) -> Result<TranslationRecord, ServiceError> {
        let target = self.validate(menu_id, target)?;
        if let Some(existing) = self.existing(EntityKind::Menu, menu_id, &target).await? {
            return Ok(existing);
        }

        let menu = self
            .store
            .get_menu(menu_id)
            .await?
            .ok_or_else(|| MenuError::MenuNotFound(menu_id.to_string()))?;

        let segments = vec![
            (Slot::Name, menu.name),
            (Slot::Description, menu.description),
        ];
        self.translate_and_store(EntityKind::Menu, menu_id, &target, segments)
            .await
    }

    /// Returns the normalized target language.
    fn validate(&self, entity_id: &str, target: &str) -> Result<String, ServiceError> {
        if entity_id.trim().is_empty() {
            return Err(ServiceError::Validation("Entity id is required".to_string()));
        }
        let target = normalize_language(target);
        if !self.languages.is_supported(&target) {
            return Err(MenuError::UnsupportedLanguage(target).into());
        }
        if target == self.languages.default {
            return Err(ServiceError::Validation(format!(
                "'{}' is the default language and needs no translation",
                target
            )));
        }
        Ok(target)
    }

    async fn existing(
        &self,
        kind: EntityKind,
        entity_id: &str,
        target: &str,
    ) -> Result<Option<TranslationRecord>, ServiceError> {
        let existing = self.store.get_translation(kind, entity_id, target).await?;
        if existing.is_some() {
            debug!(
                "Translation of {} {} into {} already stored",
                kind.collection(),
                entity_id,
                target
            );
        }
        Ok(existing)
    }

    async fn translate_and_store(
        &self,
        kind: EntityKind,
        entity_id: &str,
        target: &str,
        segments: Vec<(Slot, String)>,
    ) -> Result<TranslationRecord, ServiceError> {
        let (slots, texts): (Vec<Slot>, Vec<String>) = segments
            .into_iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .unzip();

        let translated = if texts.is_empty() {
            Vec::new()
        } else {
            self.api
                .translate(texts, &self.languages.default, target)
                .await?
        };
        if translated.len() != slots.len() {
            return Err(ServiceError::Translation(format!(
                "Expected {} translations, got {}",
                slots.len(),
                translated.len()
            )));
        }

        let mut record = TranslationRecord {
            language: target.to_string(),
            translated_at: Some(Utc::now()),
            ..Default::default()
        };
        for (slot, text) in slots.into_iter().zip(translated) {
            match slot {
                Slot::Name => record.name = Some(text),
                Slot::Description => record.description = Some(text),
                Slot::Header => record.header = Some(text),
                Slot::Footer => record.footer = Some(text),
                Slot::Option(i) => insert_label(&mut record.options, i, text),
                Slot::Extra(i) => insert_label(&mut record.extras, i, text),
                Slot::Addon(i) => insert_label(&mut record.addons, i, text),
            }
        }

        self.store.save_translation(kind, entity_id, &record).await?;
        info!(
            "Stored {} translation of {} {}",
            target,
            kind.collection(),
            entity_id
        );
        Ok(record)
    }
}

fn insert_label(labels: &mut BTreeMap<String, String>, index: usize, text: String) {
    labels.insert(index.to_string(), text);
}
