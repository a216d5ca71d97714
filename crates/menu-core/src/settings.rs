//! Viewer preferences behind a small key-value abstraction.
//!
//! Settings are read once when the manager is created and written back on
//! every change.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MenuError, Result};
use crate::language::{is_supported, normalize_language, DEFAULT_LANGUAGE};

const LANGUAGE_KEY: &str = "viewer.language";
const SHOW_ALLERGIES_KEY: &str = "viewer.show_allergies";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten on each `set`.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> HashMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Settings file {} is unreadable, starting fresh: {}", self.path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_all().remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MenuError::SettingsError(format!("Failed to create settings directory: {e}"))
            })?;
        }
        let json = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, json)
            .map_err(|e| MenuError::SettingsError(format!("Failed to write settings: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerSettings {
    pub language: String,
    pub show_allergies: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            show_allergies: true,
        }
    }
}

pub struct SettingsManager<S: KeyValueStore> {
    store: S,
    current: ViewerSettings,
}

impl<S: KeyValueStore> SettingsManager<S> {
    /// Loads persisted values; unknown or unreadable values keep the defaults.
    pub fn load(store: S) -> Result<Self> {
        let mut current = ViewerSettings::default();

        if let Some(lang) = store.get(LANGUAGE_KEY)? {
            let lang = normalize_language(&lang);
            if is_supported(&lang) {
                current.language = lang;
            } else {
                warn!("Ignoring unsupported stored language '{}'", lang);
            }
        }
        if let Some(flag) = store.get(SHOW_ALLERGIES_KEY)? {
            current.show_allergies = flag != "false";
        }

        debug!("Loaded viewer settings: {:?}", current);
        Ok(Self { store, current })
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.current
    }

    pub fn set_language(&mut self, lang: &str) -> Result<()> {
        let lang = normalize_language(lang);
        if !is_supported(&lang) {
            return Err(MenuError::UnsupportedLanguage(lang));
        }
        self.store.set(LANGUAGE_KEY, &lang)?;
        self.current.language = lang;
        Ok(())
    }

    pub fn set_show_allergies(&mut self, show: bool) -> Result<()> {
        self.store
            .set(SHOW_ALLERGIES_KEY, if show { "true" } else { "false" })?;
        self.current.show_allergies = show;
        Ok(())
    }
}
