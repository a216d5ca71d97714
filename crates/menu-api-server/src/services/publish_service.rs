//! Publish / unpublish: assemble the editable records into a canonical
//! menu and write its public snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use menu_core::{
    snapshot_path, Category, CategoryTranslation, Item, ItemTranslation, LabelTranslation, Menu,
    MenuError, MenuTranslation, PublishedMenu,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{LanguagesConfig, MissingReferencePolicy};
use crate::database::{CategoryRecord, EntityKind, ItemRecord, MenuRecord, MenuStore, TranslationRecord};
use crate::storage::ObjectStorage;
use crate::utils::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub url: String,
    pub languages: Vec<String>,
    /// Dangling category/item references left out under the skip policy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpublishOutcome {
    pub removed: bool,
}

pub struct PublishService {
    store: Arc<dyn MenuStore>,
    storage: Arc<dyn ObjectStorage>,
    languages: LanguagesConfig,
    policy: MissingReferencePolicy,
}

impl PublishService {
    pub fn new(
        store: Arc<dyn MenuStore>,
        storage: Arc<dyn ObjectStorage>,
        languages: LanguagesConfig,
        policy: MissingReferencePolicy,
    ) -> Self {
        Self {
            store,
            storage,
            languages,
            policy,
        }
    }

    pub async fn publish(&self, menu_id: &str) -> Result<PublishOutcome, ServiceError> {
        validate_menu_id(menu_id)?;

        let mut record = self
            .store
            .get_menu(menu_id)
            .await?
            .ok_or_else(|| MenuError::MenuNotFound(menu_id.to_string()))?;

        let mut skipped = Vec::new();
        let menu = self.assemble(&record, &mut skipped).await?;
        let languages = menu.languages.clone();

        let snapshot = PublishedMenu::from(menu);
        let bytes = serde_json::to_vec_pretty(&snapshot).map_err(MenuError::from)?;
        let url = self
            .storage
            .put(&snapshot_path(menu_id), bytes, "application/json")
            .await?;

        record.published_url = Some(url.clone());
        record.last_updated = Some(snapshot.last_updated);
        self.store.save_menu(&record).await?;

        info!(
            "Published menu {} ({} categories, languages: {:?}) to {}",
            menu_id,
            snapshot.categories.len(),
            languages,
            url
        );

        Ok(PublishOutcome {
            url,
            languages,
            skipped,
        })
    }

    /// Removes the snapshot. Unpublishing a menu with no snapshot succeeds.
    pub async fn unpublish(&self, menu_id: &str) -> Result<UnpublishOutcome, ServiceError> {
        validate_menu_id(menu_id)?;

        let removed = self.storage.delete(&snapshot_path(menu_id)).await?;

        if let Some(mut record) = self.store.get_menu(menu_id).await? {
            if record.published_url.take().is_some() {
                self.store.save_menu(&record).await?;
            }
        }

        if removed {
            info!("Unpublished menu {}", menu_id);
        } else {
            info!("Unpublish of menu {}: no snapshot present", menu_id);
        }
        Ok(UnpublishOutcome { removed })
    }

    /// Builds the full canonical tree: categories, items, translations.
    pub async fn assemble(
        &self,
        record: &MenuRecord,
        skipped: &mut Vec<String>,
    ) -> Result<Menu, ServiceError> {
        let mut found_languages = BTreeSet::new();

        let mut menu = Menu::new(record.id.clone(), record.name.clone());
        menu.description = record.description.clone();
        menu.menu_type = record.menu_type.clone();
        menu.default_language = self.languages.default.clone();
        menu.last_updated = Some(Utc::now());
        menu.translations = self
            .translations(EntityKind::Menu, &record.id, &mut found_languages, |t| {
                MenuTranslation {
                    name: t.name,
                    description: t.description,
                }
            })
            .await?;

        for category_id in &record.category_ids {
            let Some(category_record) = self.store.get_category(category_id).await? else {
                self.missing_reference("category", category_id, &record.id, skipped)?;
                continue;
            };
            let category = self
                .assemble_category(category_record, &mut found_languages, skipped)
                .await?;
            menu.categories.push(category);
        }

        menu.languages = std::iter::once(self.languages.default.clone())
            .chain(found_languages)
            .collect();
        menu.sort();
        Ok(menu)
    }

    async fn assemble_category(
        &self,
        record: CategoryRecord,
        found_languages: &mut BTreeSet<String>,
        skipped: &mut Vec<String>,
    ) -> Result<Category, ServiceError> {
        let extras_len = record.extras.len();
        let addons_len = record.addons.len();

        let mut category = Category::new(record.id, record.name, record.order);
        category.description = record.description;
        category.header = record.header;
        category.footer = record.footer;
        category.extras = record.extras;
        category.addons = record.addons;
        category.translations = self
            .translations(EntityKind::Category, &category.id, found_languages, |t| {
                CategoryTranslation {
                    name: t.name,
                    description: t.description,
                    header: t.header,
                    footer: t.footer,
                    extras: positional(&t.extras, extras_len),
                    addons: positional(&t.addons, addons_len),
                }
            })
            .await?;

        for item_id in &record.item_ids {
            let Some(item_record) = self.store.get_item(item_id).await? else {
                self.missing_reference("item", item_id, &category.id, skipped)?;
                continue;
            };
            let item = self.assemble_item(item_record, found_languages).await?;
            category.items.push(item);
        }
        Ok(category)
    }

    async fn assemble_item(
        &self,
        record: ItemRecord,
        found_languages: &mut BTreeSet<String>,
    ) -> Result<Item, ServiceError> {
        let options_len = record.options.len();
        let extras_len = record.extras.len();
        let addons_len = record.addons.len();

        let mut item = Item::new(record.id, record.name, record.price, record.order);
        item.description = record.description;
        item.flags = record.flags;
        item.allergies = record.allergies;
        item.options = record.options;
        item.extras = record.extras;
        item.addons = record.addons;
        item.image = record.image;
        item.translations = self
            .translations(EntityKind::Item, &item.id, found_languages, |t| {
                ItemTranslation {
                    name: t.name,
                    description: t.description,
                    options: positional(&t.options, options_len),
                    extras: positional(&t.extras, extras_len),
                    addons: positional(&t.addons, addons_len),
                }
            })
            .await?;
        Ok(item)
    }

    /// Stored translations of one entity for every non-default language.
    async fn translations<T>(
        &self,
        kind: EntityKind,
        entity_id: &str,
        found_languages: &mut BTreeSet<String>,
        reshape: impl Fn(TranslationRecord) -> T,
    ) -> Result<BTreeMap<String, T>, ServiceError> {
        let mut out = BTreeMap::new();
        for lang in &self.languages.supported {
            if *lang == self.languages.default {
                continue;
            }
            if let Some(record) = self.store.get_translation(kind, entity_id, lang).await? {
                found_languages.insert(lang.clone());
                out.insert(lang.clone(), reshape(record));
            }
        }
        Ok(out)
    }

    fn missing_reference(
        &self,
        what: &str,
        id: &str,
        parent: &str,
        skipped: &mut Vec<String>,
    ) -> Result<(), ServiceError> {
        match self.policy {
            MissingReferencePolicy::Skip => {
                warn!("Skipping missing {} {} referenced by {}", what, id, parent);
                skipped.push(format!("{}:{}", what, id));
                Ok(())
            }
            MissingReferencePolicy::Fail => Err(ServiceError::NotFound(format!(
                "{} {} referenced by {} does not exist",
                what, id, parent
            ))),
        }
    }
}

fn validate_menu_id(menu_id: &str) -> Result<(), ServiceError> {
    let valid = !menu_id.trim().is_empty()
        && menu_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ServiceError::Validation(format!("Invalid menu id: '{}'", menu_id)));
    }
    Ok(())
}

/// Index-keyed labels -> array aligned with the canonical one.
fn positional(labels: &BTreeMap<String, String>, len: usize) -> Vec<LabelTranslation> {
    if labels.is_empty() {
        return Vec::new();
    }
    (0..len)
        .map(|i| match labels.get(&i.to_string()) {
            Some(label) if !label.trim().is_empty() => LabelTranslation::new(label.clone()),
            _ => LabelTranslation::missing(),
        })
        .collect()
}
