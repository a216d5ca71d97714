//! Per-language translation overlays, one explicit schema per entity kind.
//!
//! Array fields (`options`, `extras`, `addons`) are positional: entry `i`
//! translates entry `i` of the canonical array on the same entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `language code -> overlay`
pub type TranslationMap<T> = BTreeMap<String, T>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuTranslation {
    #[serde(default, alias = "menu_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "menu_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTranslation {
    #[serde(default, alias = "cat_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "cat_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<LabelTranslation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<LabelTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTranslation {
    #[serde(default, alias = "item_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "item_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<LabelTranslation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<LabelTranslation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<LabelTranslation>,
}

/// Translated label of one array entry. Accepts `"text"`, `{"label": ..}`
/// or `null` on input; a gap in the array is `label: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLabel")]
pub struct LabelTranslation {
    pub label: Option<String>,
}

impl LabelTranslation {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    pub fn missing() -> Self {
        Self { label: None }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Entry {
        #[serde(default)]
        label: Option<String>,
    },
    Missing(Option<()>),
}

impl From<RawLabel> for LabelTranslation {
    fn from(raw: RawLabel) -> Self {
        match raw {
            RawLabel::Text(text) => Self { label: Some(text) },
            RawLabel::Entry { label } => Self { label },
            RawLabel::Missing(_) => Self::missing(),
        }
    }
}

/// Non-empty overlay text, or `None`.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Non-empty label at `index` of a positional overlay array.
pub(crate) fn label_at(labels: &[LabelTranslation], index: usize) -> Option<&str> {
    labels
        .get(index)
        .and_then(|entry| non_empty(entry.label.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_translation_shapes() {
        let parsed: Vec<LabelTranslation> =
            serde_json::from_str(r#"["Petit", {"label": "Grand"}, null, {}]"#).unwrap();
        assert_eq!(parsed[0].label.as_deref(), Some("Petit"));
        assert_eq!(parsed[1].label.as_deref(), Some("Grand"));
        assert_eq!(parsed[2], LabelTranslation::missing());
        assert_eq!(parsed[3], LabelTranslation::missing());
    }

    #[test]
    fn test_legacy_aliases() {
        let parsed: ItemTranslation =
            serde_json::from_str(r#"{"item_name": "Sopa", "item_description": "Caliente"}"#)
                .unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Sopa"));
        assert_eq!(parsed.description.as_deref(), Some("Caliente"));
    }

    #[test]
    fn test_label_at_skips_blank_and_out_of_range() {
        let labels = vec![LabelTranslation::new("  "), LabelTranslation::new("Grand")];
        assert_eq!(label_at(&labels, 0), None);
        assert_eq!(label_at(&labels, 1), Some("Grand"));
        assert_eq!(label_at(&labels, 5), None);
    }
}
