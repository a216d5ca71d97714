//! Static UI string dictionaries keyed by short keys

use std::collections::HashMap;

use once_cell::sync::Lazy;

type Dictionary = HashMap<&'static str, &'static str>;

static UI_STRINGS: Lazy<HashMap<&'static str, Dictionary>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        "en",
        Dictionary::from([
            ("allergens", "Allergens"),
            ("vegetarian", "Vegetarian"),
            ("vegan", "Vegan"),
            ("spicy", "Spicy"),
            ("options", "Options"),
            ("extras", "Extras"),
            ("addons", "Add-ons"),
            ("from", "from"),
            ("price_on_request", "Price on request"),
            ("last_updated", "Last updated"),
            ("no_menus", "No menus published yet"),
            ("show_allergies", "Show allergies"),
            ("language", "Language"),
        ]),
    );
    table.insert(
        "es",
        Dictionary::from([
            ("allergens", "Alérgenos"),
            ("vegetarian", "Vegetariano"),
            ("vegan", "Vegano"),
            ("spicy", "Picante"),
            ("options", "Opciones"),
            ("extras", "Extras"),
            ("addons", "Complementos"),
            ("from", "desde"),
            ("price_on_request", "Precio a consultar"),
            ("last_updated", "Última actualización"),
            ("no_menus", "Todavía no hay menús publicados"),
            ("show_allergies", "Mostrar alérgenos"),
            ("language", "Idioma"),
        ]),
    );
    table.insert(
        "fr",
        Dictionary::from([
            ("allergens", "Allergènes"),
            ("vegetarian", "Végétarien"),
            ("vegan", "Végan"),
            ("spicy", "Épicé"),
            ("options", "Options"),
            ("extras", "Suppléments"),
            ("addons", "Accompagnements"),
            ("from", "à partir de"),
            ("price_on_request", "Prix sur demande"),
            ("last_updated", "Dernière mise à jour"),
            ("show_allergies", "Afficher les allergènes"),
            ("language", "Langue"),
        ]),
    );
    table.insert(
        "de",
        Dictionary::from([
            ("allergens", "Allergene"),
            ("vegetarian", "Vegetarisch"),
            ("vegan", "Vegan"),
            ("spicy", "Scharf"),
            ("options", "Optionen"),
            ("extras", "Extras"),
            ("addons", "Beilagen"),
            ("from", "ab"),
            ("last_updated", "Zuletzt aktualisiert"),
            ("language", "Sprache"),
        ]),
    );
    table.insert(
        "it",
        Dictionary::from([
            ("allergens", "Allergeni"),
            ("vegetarian", "Vegetariano"),
            ("vegan", "Vegano"),
            ("spicy", "Piccante"),
            ("options", "Opzioni"),
            ("from", "da"),
            ("language", "Lingua"),
        ]),
    );
    table
});

/// UI text for `key`: requested language, then default language, then the
/// key itself.
pub fn ui_text<'a>(key: &'a str, requested: &str, default: &str) -> &'a str {
    lookup(requested, key)
        .or_else(|| lookup(default, key))
        .unwrap_or(key)
}

fn lookup(lang: &str, key: &str) -> Option<&'static str> {
    UI_STRINGS.get(lang)?.get(key).copied()
}
