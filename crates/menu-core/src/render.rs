//! Localized view of a menu tree, ready for any front end to print.

use serde::Serialize;

use crate::allergy::{allergy_label, collapse_allergies, icon_for};
use crate::domain::{Category, Item, Menu};
use crate::resolver::{resolve, ui_text, CategoryField, ItemField, MenuField};
use crate::settings::ViewerSettings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub name: String,
    pub description: String,
    pub language: String,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub header: Option<String>,
    pub description: Option<String>,
    pub footer: Option<String>,
    pub items: Vec<ItemView>,
    pub extras: Vec<PricedLabel>,
    pub addons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub name: String,
    pub description: Option<String>,
    pub price: PriceDisplay,
    pub badges: Vec<String>,
    pub options: Vec<PricedLabel>,
    pub extras: Vec<PricedLabel>,
    pub addons: Vec<String>,
    pub allergies: Vec<AllergyView>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedLabel {
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PriceDisplay {
    Fixed(f64),
    /// Zero base price: cheapest option.
    FromOptions(f64),
    /// Zero base price and no options.
    OnRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllergyView {
    pub name: String,
    pub label: String,
    /// `None` means render the label as text only.
    pub icon: Option<&'static str>,
}

pub fn render_menu(menu: &Menu, settings: &ViewerSettings) -> MenuView {
    let ctx = RenderContext {
        lang: &settings.language,
        default: &menu.default_language,
        show_allergies: settings.show_allergies,
    };

    MenuView {
        name: resolve(menu, MenuField::Name, ctx.lang, ctx.default),
        description: resolve(menu, MenuField::Description, ctx.lang, ctx.default),
        language: settings.language.clone(),
        categories: menu.categories.iter().map(|c| ctx.category(c)).collect(),
    }
}

struct RenderContext<'a> {
    lang: &'a str,
    default: &'a str,
    show_allergies: bool,
}

impl RenderContext<'_> {
    fn category(&self, category: &Category) -> CategoryView {
        let text = |field| resolve(category, field, self.lang, self.default);
        let optional = |field| Some(text(field)).filter(|s| !s.is_empty());

        CategoryView {
            name: text(CategoryField::Name),
            header: optional(CategoryField::Header),
            description: optional(CategoryField::Description),
            footer: optional(CategoryField::Footer),
            items: category
                .items
                .iter()
                .filter(|item| item.flags.active)
                .map(|item| self.item(item))
                .collect(),
            extras: category
                .extras
                .iter()
                .enumerate()
                .map(|(i, extra)| PricedLabel {
                    label: text(CategoryField::Extra(i)),
                    price: extra.price,
                })
                .collect(),
            addons: (0..category.addons.len())
                .map(|i| text(CategoryField::Addon(i)))
                .collect(),
        }
    }

    fn item(&self, item: &Item) -> ItemView {
        let text = |field| resolve(item, field, self.lang, self.default);

        let mut badges = Vec::new();
        for (set, key) in [
            (item.flags.vegetarian, "vegetarian"),
            (item.flags.vegan, "vegan"),
            (item.flags.spicy, "spicy"),
        ] {
            if set {
                badges.push(ui_text(key, self.lang, self.default).to_string());
            }
        }

        let allergies = if self.show_allergies {
            collapse_allergies(&item.allergies)
                .into_iter()
                .map(|name| AllergyView {
                    label: allergy_label(&name, self.lang, self.default),
                    icon: icon_for(&name),
                    name,
                })
                .collect()
        } else {
            Vec::new()
        };

        ItemView {
            name: text(ItemField::Name),
            description: Some(text(ItemField::Description)).filter(|s| !s.is_empty()),
            price: price_display(item),
            badges,
            options: item
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| PricedLabel {
                    label: text(ItemField::Option(i)),
                    price: option.price,
                })
                .collect(),
            extras: item
                .extras
                .iter()
                .enumerate()
                .map(|(i, extra)| PricedLabel {
                    label: text(ItemField::Extra(i)),
                    price: extra.price,
                })
                .collect(),
            addons: (0..item.addons.len())
                .map(|i| text(ItemField::Addon(i)))
                .collect(),
            allergies,
            image_url: item.image.as_ref().map(|img| img.small_url.clone()),
        }
    }
}

pub fn price_display(item: &Item) -> PriceDisplay {
    if !item.is_priced_by_options() {
        return PriceDisplay::Fixed(item.price);
    }
    item.options
        .iter()
        .map(|o| o.price)
        .min_by(f64::total_cmp)
        .map_or(PriceDisplay::OnRequest, PriceDisplay::FromOptions)
}

/// Plain-text rendering used by the terminal viewer.
pub fn to_text(view: &MenuView, default_language: &str) -> String {
    let t = |key: &'static str| -> &'static str {
        ui_text(key, &view.language, default_language)
    };
    let mut out = String::new();

    out.push_str(&format!("{}\n", view.name));
    if !view.description.is_empty() {
        out.push_str(&format!("{}\n", view.description));
    }

    for category in &view.categories {
        out.push_str(&format!("\n== {} ==\n", category.name));
        for line in [&category.header, &category.description].into_iter().flatten() {
            out.push_str(&format!("{}\n", line));
        }
        for item in &category.items {
            let price = match item.price {
                PriceDisplay::Fixed(p) => format!("{:.2}", p),
                PriceDisplay::FromOptions(p) => format!("{} {:.2}", t("from"), p),
                PriceDisplay::OnRequest => t("price_on_request").to_string(),
            };
            out.push_str(&format!("  {} .... {}\n", item.name, price));
            if let Some(description) = &item.description {
                out.push_str(&format!("    {}\n", description));
            }
            if !item.badges.is_empty() {
                out.push_str(&format!("    [{}]\n", item.badges.join(", ")));
            }
            for option in &item.options {
                out.push_str(&format!("    - {} {:.2}\n", option.label, option.price));
            }
            for extra in &item.extras {
                out.push_str(&format!("    + {} {:.2}\n", extra.label, extra.price));
            }
            for addon in &item.addons {
                out.push_str(&format!("    + {}\n", addon));
            }
            if !item.allergies.is_empty() {
                let labels: Vec<_> = item.allergies.iter().map(|a| a.label.as_str()).collect();
                out.push_str(&format!("    {}: {}\n", t("allergens"), labels.join(", ")));
            }
        }
        if !category.extras.is_empty() {
            out.push_str(&format!("  {}:\n", t("extras")));
            for extra in &category.extras {
                out.push_str(&format!("    + {} {:.2}\n", extra.label, extra.price));
            }
        }
        if !category.addons.is_empty() {
            out.push_str(&format!("  {}: {}\n", t("addons"), category.addons.join(", ")));
        }
        if let Some(footer) = &category.footer {
            out.push_str(&format!("{}\n", footer));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemTranslation, PriceOption};

    fn sample_menu() -> Menu {
        let mut menu = Menu::new("m1", "Lunch");
        let mut soups = Category::new("c1", "Soups", 1);

        let mut soup = Item::new("i1", "Tomato soup", 0.0, 1);
        soup.flags.vegetarian = true;
        soup.allergies = vec!["soy".into(), "Soya".into(), "kiwi".into()];
        soup.options = vec![
            PriceOption { label: "Large".into(), price: 6.0 },
            PriceOption { label: "Small".into(), price: 4.0 },
        ];
        soup.translations.insert(
            "es".into(),
            ItemTranslation {
                name: Some("Sopa de tomate".into()),
                ..Default::default()
            },
        );

        let mut hidden = Item::new("i2", "Old special", 9.0, 2);
        hidden.flags.active = false;

        soups.items = vec![soup, hidden];
        menu.categories.push(soups);
        menu
    }

    #[test]
    fn test_render_localized() {
        let settings = ViewerSettings {
            language: "es".into(),
            show_allergies: true,
        };
        let view = render_menu(&sample_menu(), &settings);
        let items = &view.categories[0].items;

        assert_eq!(items.len(), 1, "inactive items are hidden");
        assert_eq!(items[0].name, "Sopa de tomate");
        assert_eq!(items[0].badges, vec!["Vegetariano"]);
        assert_eq!(items[0].price, PriceDisplay::FromOptions(4.0));

        let allergies = &items[0].allergies;
        assert_eq!(allergies.len(), 2);
        assert_eq!(allergies[0].name, "soya");
        assert_eq!(allergies[0].label, "Soja");
        assert!(allergies[0].icon.is_some());
        assert_eq!(allergies[1].icon, None);
    }

    #[test]
    fn test_hide_allergies() {
        let settings = ViewerSettings {
            language: "en".into(),
            show_allergies: false,
        };
        let view = render_menu(&sample_menu(), &settings);
        assert!(view.categories[0].items[0].allergies.is_empty());
    }

    #[test]
    fn test_price_display() {
        assert_eq!(price_display(&Item::new("a", "A", 3.5, 0)), PriceDisplay::Fixed(3.5));
        assert_eq!(price_display(&Item::new("b", "B", 0.0, 0)), PriceDisplay::OnRequest);
    }

    #[test]
    fn test_to_text() {
        let view = render_menu(&sample_menu(), &ViewerSettings::default());
        let text = to_text(&view, "en");
        assert!(text.starts_with("Lunch\n"));
        assert!(text.contains("Tomato soup .... from 4.00"));
        assert!(text.contains("Allergens: Soya, kiwi"));
        assert!(!text.contains("Old special"));
    }
}
