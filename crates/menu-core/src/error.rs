//! Domain errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MenuError>;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Malformed item #{index} in category '{category}': {reason}")]
    MalformedItem {
        category: String,
        index: usize,
        reason: String,
    },

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Settings store error: {0}")]
    SettingsError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
