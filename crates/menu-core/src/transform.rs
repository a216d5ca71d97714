//! Raw document -> canonical [`Menu`].
//!
//! Accepts the published snapshot shape (`{"menu": {..}, "categories": [..]}`)
//! as well as flat documents, and both the legacy field names (`item_name`,
//! `cat_name`, ...) and the plain ones (`name`, ...). The legacy name wins
//! when both are present.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{
    Addon, Category, Extra, Item, ItemFlags, ItemImages, Menu, PriceOption, TranslationMap,
};
use crate::error::{MenuError, Result};
use crate::language::DEFAULT_LANGUAGE;

type Object = Map<String, Value>;

/// Strict transform: the first malformed item fails the whole document.
pub fn transform(raw: &Value) -> Result<Menu> {
    let mut rejected = Vec::new();
    let menu = build_menu(raw, &mut |err| {
        rejected.push(err);
        false
    })?;
    match rejected.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(menu),
    }
}

/// Lenient transform: malformed items are dropped and reported.
pub fn transform_lenient(raw: &Value) -> Result<(Menu, Vec<MenuError>)> {
    let mut rejected = Vec::new();
    let menu = build_menu(raw, &mut |err| {
        warn!("Dropping entry from menu document: {}", err);
        rejected.push(err);
        true
    })?;
    Ok((menu, rejected))
}

/// `on_reject` returns whether building should continue.
fn build_menu(raw: &Value, on_reject: &mut dyn FnMut(MenuError) -> bool) -> Result<Menu> {
    let root = raw
        .as_object()
        .ok_or_else(|| MenuError::MalformedDocument("menu document must be an object".into()))?;
    let meta = root.get("menu").and_then(Value::as_object).unwrap_or(root);

    let default_language = text(root, &["defaultLanguage", "default_language"])
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let mut menu = Menu::new(
        text(meta, &["id", "menu_id", "menuId"]).unwrap_or_default(),
        text(meta, &["menu_name", "name"]).unwrap_or_default(),
    );
    menu.description = text(meta, &["menu_description", "description"]).unwrap_or_default();
    menu.menu_type = text(meta, &["type", "menu_type", "menuType"]).unwrap_or_default();
    menu.languages = languages(root, &default_language);
    menu.default_language = default_language;
    menu.last_updated = first(root, &["lastUpdated", "last_updated"])
        .or_else(|| first(meta, &["lastUpdated", "last_updated"]))
        .and_then(timestamp);
    menu.translations = translations(meta.get("translations"), &menu.id);

    let raw_categories = first(root, &["categories"])
        .or_else(|| first(meta, &["categories"]))
        .and_then(Value::as_array);

    for (index, raw_category) in raw_categories.into_iter().flatten().enumerate() {
        let Some(object) = raw_category.as_object() else {
            let err = MenuError::MalformedDocument(format!("category #{} is not an object", index));
            if on_reject(err) {
                continue;
            }
            return Ok(menu);
        };
        match build_category(object, on_reject) {
            Some(category) => menu.categories.push(category),
            None => return Ok(menu),
        }
    }

    menu.sort();
    debug!(
        "Transformed menu '{}' with {} categories",
        menu.id,
        menu.categories.len()
    );
    Ok(menu)
}

/// `None` when a rejection stopped the build.
fn build_category(
    raw: &Object,
    on_reject: &mut dyn FnMut(MenuError) -> bool,
) -> Option<Category> {
    let mut category = Category::new(
        text(raw, &["id", "cat_id", "categoryId"]).unwrap_or_default(),
        text(raw, &["cat_name", "name"]).unwrap_or_default(),
        order(raw, &["cat_order", "order"]),
    );
    category.description = text(raw, &["cat_description", "description"]);
    category.header = text(raw, &["cat_header", "header"]);
    category.footer = text(raw, &["cat_footer", "footer"]);
    category.extras = extras(raw.get("extras"));
    category.addons = addons(raw.get("addons"));
    category.translations = translations(raw.get("translations"), &category.id);

    let raw_items = raw.get("items").and_then(Value::as_array);
    for (index, raw_item) in raw_items.into_iter().flatten().enumerate() {
        match build_item(raw_item, &category.name, index) {
            Ok(item) => category.items.push(item),
            Err(err) => {
                if !on_reject(err) {
                    return None;
                }
            }
        }
    }
    Some(category)
}

fn build_item(raw: &Value, category: &str, index: usize) -> Result<Item> {
    let malformed = |reason: &str| MenuError::MalformedItem {
        category: category.to_string(),
        index,
        reason: reason.to_string(),
    };
    let raw = raw.as_object().ok_or_else(|| malformed("item is not an object"))?;
    let flags = raw
        .get("flags")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing flags object"))?;

    let mut item = Item::new(
        text(raw, &["id", "item_id", "itemId"]).unwrap_or_default(),
        text(raw, &["item_name", "name"]).unwrap_or_default(),
        price(first(raw, &["item_price", "price"])),
        order(raw, &["item_order", "order"]),
    );
    item.description = text(raw, &["item_description", "description"]);
    item.flags = ItemFlags {
        active: !(is_false(flags.get("active"))
            || is_false(raw.get("isActive"))
            || is_false(raw.get("is_active"))),
        vegetarian: is_true(flags.get("vegetarian")),
        vegan: is_true(flags.get("vegan")),
        spicy: is_true(flags.get("spicy")),
    };
    item.allergies = allergies(raw.get("allergies"));
    item.options = options(raw.get("options"));
    item.extras = extras(raw.get("extras"));
    item.addons = addons(raw.get("addons"));
    item.image = image(raw);
    item.translations = translations(raw.get("translations"), &item.id);
    Ok(item)
}

/// First key whose value is not null.
fn first<'a>(raw: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !value.is_null())
}

fn text(raw: &Object, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find_map(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Numbers and numeric strings; anything else, negative or non-finite is 0.
pub fn price(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0)
}

fn order(raw: &Object, keys: &[&str]) -> i64 {
    match first(raw, keys) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

fn is_false(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(false)))
}

/// Unreadable labels become `""` so translation indices stay aligned.
fn label(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Object(entry) => text(entry, &["label", "name", "option_name"]).unwrap_or_default(),
        _ => String::new(),
    }
}

fn entry_price(raw: &Value, keys: &[&str]) -> f64 {
    price(raw.as_object().and_then(|o| first(o, keys)))
}

fn options(value: Option<&Value>) -> Vec<PriceOption> {
    entries(value)
        .map(|raw| PriceOption {
            label: label(raw),
            price: entry_price(raw, &["price", "option_price"]),
        })
        .collect()
}

fn extras(value: Option<&Value>) -> Vec<Extra> {
    entries(value)
        .map(|raw| Extra {
            label: label(raw),
            price: entry_price(raw, &["price", "extra_price"]),
        })
        .collect()
}

fn addons(value: Option<&Value>) -> Vec<Addon> {
    entries(value).map(|raw| Addon { label: label(raw) }).collect()
}

fn entries(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value.and_then(Value::as_array).into_iter().flatten()
}

fn allergies(value: Option<&Value>) -> Vec<String> {
    let names: Vec<String> = match value {
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(joined)) => joined.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn image(raw: &Object) -> Option<ItemImages> {
    let nested = raw.get("image").and_then(Value::as_object);
    let small = nested
        .and_then(|img| text(img, &["smallUrl", "small_url"]))
        .or_else(|| text(raw, &["image_small_url", "imageSmallUrl"]))?;
    let large = nested
        .and_then(|img| text(img, &["largeUrl", "large_url"]))
        .or_else(|| text(raw, &["image_large_url", "imageLargeUrl"]))?;
    Some(ItemImages {
        small_url: small,
        large_url: large,
    })
}

fn languages(root: &Object, default_language: &str) -> Vec<String> {
    let mut languages = vec![default_language.to_string()];
    for lang in entries(root.get("languages")).filter_map(Value::as_str) {
        if !languages.iter().any(|known| known == lang) {
            languages.push(lang.to_string());
        }
    }
    languages
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn translations<T: DeserializeOwned>(value: Option<&Value>, owner: &str) -> TranslationMap<T> {
    let Some(Value::Object(by_language)) = value else {
        return TranslationMap::new();
    };
    by_language
        .iter()
        .filter_map(|(lang, overlay)| match serde_json::from_value::<T>(overlay.clone()) {
            Ok(parsed) => Some((lang.clone(), parsed)),
            Err(e) => {
                warn!("Ignoring unreadable '{}' translation of '{}': {}", lang, owner, e);
                None
            }
        })
        .collect()
}
