//! Translation resolution with a fixed fallback chain:
//! requested language -> canonical value.
//!
//! When the requested language is the default language no overlay is
//! consulted. A blank overlay value counts as missing.

use crate::domain::translation::{label_at, non_empty};
use crate::domain::{Category, Item, Menu};

pub use crate::allergy::allergy_label;
pub use crate::ui_strings::ui_text;

/// An entity whose display text can be overlaid per language.
pub trait Localized {
    type Field: Copy;

    /// Canonical (default-language) text for `field`.
    fn canonical(&self, field: Self::Field) -> Option<&str>;

    /// Overlay text for `field` in `lang`, if a non-empty one exists.
    fn translated(&self, lang: &str, field: Self::Field) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuField {
    Name,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Description,
    Header,
    Footer,
    Extra(usize),
    Addon(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Description,
    Option(usize),
    Extra(usize),
    Addon(usize),
}

/// Display text for `field`, never failing: missing canonical text is `""`.
pub fn resolve<E: Localized + ?Sized>(
    entity: &E,
    field: E::Field,
    requested: &str,
    default: &str,
) -> String {
    if requested != default {
        if let Some(text) = entity.translated(requested, field) {
            return text.to_string();
        }
    }
    entity.canonical(field).unwrap_or_default().to_string()
}

impl Localized for Menu {
    type Field = MenuField;

    fn canonical(&self, field: MenuField) -> Option<&str> {
        match field {
            MenuField::Name => Some(&self.name),
            MenuField::Description => Some(&self.description),
        }
    }

    fn translated(&self, lang: &str, field: MenuField) -> Option<&str> {
        let overlay = self.translations.get(lang)?;
        match field {
            MenuField::Name => non_empty(overlay.name.as_ref()),
            MenuField::Description => non_empty(overlay.description.as_ref()),
        }
    }
}

impl Localized for Category {
    type Field = CategoryField;

    fn canonical(&self, field: CategoryField) -> Option<&str> {
        match field {
            CategoryField::Name => Some(&self.name),
            CategoryField::Description => self.description.as_deref(),
            CategoryField::Header => self.header.as_deref(),
            CategoryField::Footer => self.footer.as_deref(),
            CategoryField::Extra(i) => self.extras.get(i).map(|e| e.label.as_str()),
            CategoryField::Addon(i) => self.addons.get(i).map(|a| a.label.as_str()),
        }
    }

    fn translated(&self, lang: &str, field: CategoryField) -> Option<&str> {
        let overlay = self.translations.get(lang)?;
        match field {
            CategoryField::Name => non_empty(overlay.name.as_ref()),
            CategoryField::Description => non_empty(overlay.description.as_ref()),
            CategoryField::Header => non_empty(overlay.header.as_ref()),
            CategoryField::Footer => non_empty(overlay.footer.as_ref()),
            CategoryField::Extra(i) => label_at(&overlay.extras, i),
            CategoryField::Addon(i) => label_at(&overlay.addons, i),
        }
    }
}

impl Localized for Item {
    type Field = ItemField;

    fn canonical(&self, field: ItemField) -> Option<&str> {
        match field {
            ItemField::Name => Some(&self.name),
            ItemField::Description => self.description.as_deref(),
            ItemField::Option(i) => self.options.get(i).map(|o| o.label.as_str()),
            ItemField::Extra(i) => self.extras.get(i).map(|e| e.label.as_str()),
            ItemField::Addon(i) => self.addons.get(i).map(|a| a.label.as_str()),
        }
    }

    fn translated(&self, lang: &str, field: ItemField) -> Option<&str> {
        let overlay = self.translations.get(lang)?;
        match field {
            ItemField::Name => non_empty(overlay.name.as_ref()),
            ItemField::Description => non_empty(overlay.description.as_ref()),
            ItemField::Option(i) => label_at(&overlay.options, i),
            ItemField::Extra(i) => label_at(&overlay.extras, i),
            ItemField::Addon(i) => label_at(&overlay.addons, i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemTranslation, LabelTranslation, PriceOption};

    fn soup() -> Item {
        let mut item = Item::new("i1", "Soup", 0.0, 1);
        item.description = Some("Hot".to_string());
        item.options = vec![
            PriceOption { label: "Small".to_string(), price: 3.0 },
            PriceOption { label: "Medium".to_string(), price: 4.0 },
            PriceOption { label: "Large".to_string(), price: 5.0 },
        ];
        item.translations.insert(
            "es".to_string(),
            ItemTranslation {
                name: Some("Sopa".to_string()),
                description: Some("".to_string()),
                options: vec![LabelTranslation::new("Pequeña"), LabelTranslation::missing()],
                ..Default::default()
            },
        );
        item
    }

    #[test]
    fn test_default_language_ignores_overlay() {
        let mut item = soup();
        item.translations.insert(
            "en".to_string(),
            ItemTranslation {
                name: Some("Broth".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(resolve(&item, ItemField::Name, "en", "en"), "Soup");
    }

    #[test]
    fn test_translation_used_verbatim() {
        let item = soup();
        assert_eq!(resolve(&item, ItemField::Name, "es", "en"), "Sopa");
        assert_eq!(resolve(&item, ItemField::Option(0), "es", "en"), "Pequeña");
    }

    #[test]
    fn test_missing_translation_falls_back() {
        let item = soup();
        // blank overlay
        assert_eq!(resolve(&item, ItemField::Description, "es", "en"), "Hot");
        // gap in the array
        assert_eq!(resolve(&item, ItemField::Option(1), "es", "en"), "Medium");
        // array shorter than the canonical one
        assert_eq!(resolve(&item, ItemField::Option(2), "es", "en"), "Large");
        // no overlay at all for the language
        assert_eq!(resolve(&item, ItemField::Name, "fr", "en"), "Soup");
    }

    #[test]
    fn test_absent_canonical_is_empty() {
        let item = Item::new("i2", "Bread", 2.0, 0);
        assert_eq!(resolve(&item, ItemField::Description, "en", "en"), "");
        assert_eq!(resolve(&item, ItemField::Extra(3), "fr", "en"), "");
    }

    #[test]
    fn test_category_fields() {
        let mut category = Category::new("c1", "Desserts", 1);
        category.footer = Some("Ask for gluten free options".to_string());
        category.extras = vec![crate::domain::Extra { label: "Cream".to_string(), price: 1.0 }];
        category.translations.insert(
            "fr".to_string(),
            crate::domain::CategoryTranslation {
                name: Some("Desserts maison".to_string()),
                extras: vec![LabelTranslation::new("Crème")],
                ..Default::default()
            },
        );

        assert_eq!(resolve(&category, CategoryField::Name, "fr", "en"), "Desserts maison");
        assert_eq!(resolve(&category, CategoryField::Extra(0), "fr", "en"), "Crème");
        assert_eq!(
            resolve(&category, CategoryField::Footer, "fr", "en"),
            "Ask for gluten free options"
        );
        assert_eq!(resolve(&category, CategoryField::Header, "fr", "en"), "");
    }

    #[test]
    fn test_menu_fields() {
        let mut menu = Menu::new("m1", "Lunch");
        menu.translations.insert(
            "de".to_string(),
            crate::domain::MenuTranslation {
                name: Some("Mittagessen".to_string()),
                description: None,
            },
        );
        assert_eq!(resolve(&menu, MenuField::Name, "de", "en"), "Mittagessen");
        assert_eq!(resolve(&menu, MenuField::Description, "de", "en"), "");
    }
}
