//! Allergy names: normalization, synonym collapsing, icons and labels

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canonical allergen names (EU 14) and their icon assets.
const ICONS: &[(&str, &str)] = &[
    ("gluten", "icons/allergies/gluten.svg"),
    ("crustaceans", "icons/allergies/crustaceans.svg"),
    ("eggs", "icons/allergies/eggs.svg"),
    ("fish", "icons/allergies/fish.svg"),
    ("peanuts", "icons/allergies/peanuts.svg"),
    ("soya", "icons/allergies/soya.svg"),
    ("milk", "icons/allergies/milk.svg"),
    ("nuts", "icons/allergies/nuts.svg"),
    ("celery", "icons/allergies/celery.svg"),
    ("mustard", "icons/allergies/mustard.svg"),
    ("sesame", "icons/allergies/sesame.svg"),
    ("sulphites", "icons/allergies/sulphites.svg"),
    ("lupin", "icons/allergies/lupin.svg"),
    ("molluscs", "icons/allergies/molluscs.svg"),
];

/// Synonyms and common misspellings mapped to the canonical name.
const SYNONYMS: &[(&str, &str)] = &[
    ("soy", "soya"),
    ("soja", "soya"),
    ("dairy", "milk"),
    ("lactose", "milk"),
    ("egg", "eggs"),
    ("peanut", "peanuts"),
    ("nut", "nuts"),
    ("tree nuts", "nuts"),
    ("treenuts", "nuts"),
    ("shellfish", "crustaceans"),
    ("crustacean", "crustaceans"),
    ("mollusc", "molluscs"),
    ("mollusk", "molluscs"),
    ("mollusks", "molluscs"),
    ("sulfites", "sulphites"),
    ("sulfite", "sulphites"),
    ("sulphite", "sulphites"),
    ("sulfur dioxide", "sulphites"),
    ("wheat", "gluten"),
    ("glutten", "gluten"),
    ("sesame seeds", "sesame"),
    ("seasme", "sesame"),
    ("celeriac", "celery"),
    ("lupine", "lupin"),
];

static ICON_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ICONS.iter().copied().collect());

static SYNONYM_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SYNONYMS.iter().copied().collect());

static LABELS: Lazy<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        let mut table = HashMap::new();
        table.insert(
            "en",
            HashMap::from([
                ("gluten", "Gluten"),
                ("crustaceans", "Crustaceans"),
                ("eggs", "Eggs"),
                ("fish", "Fish"),
                ("peanuts", "Peanuts"),
                ("soya", "Soya"),
                ("milk", "Milk"),
                ("nuts", "Nuts"),
                ("celery", "Celery"),
                ("mustard", "Mustard"),
                ("sesame", "Sesame"),
                ("sulphites", "Sulphites"),
                ("lupin", "Lupin"),
                ("molluscs", "Molluscs"),
            ]),
        );
        table.insert(
            "es",
            HashMap::from([
                ("gluten", "Gluten"),
                ("crustaceans", "Crustáceos"),
                ("eggs", "Huevos"),
                ("fish", "Pescado"),
                ("peanuts", "Cacahuetes"),
                ("soya", "Soja"),
                ("milk", "Lácteos"),
                ("nuts", "Frutos de cáscara"),
                ("celery", "Apio"),
                ("mustard", "Mostaza"),
                ("sesame", "Sésamo"),
                ("sulphites", "Sulfitos"),
                ("lupin", "Altramuces"),
                ("molluscs", "Moluscos"),
            ]),
        );
        table.insert(
            "fr",
            HashMap::from([
                ("gluten", "Gluten"),
                ("crustaceans", "Crustacés"),
                ("eggs", "Œufs"),
                ("fish", "Poisson"),
                ("peanuts", "Arachides"),
                ("soya", "Soja"),
                ("milk", "Lait"),
                ("nuts", "Fruits à coque"),
                ("celery", "Céleri"),
                ("mustard", "Moutarde"),
                ("sesame", "Sésame"),
                ("sulphites", "Sulfites"),
                ("molluscs", "Mollusques"),
            ]),
        );
        table.insert(
            "de",
            HashMap::from([
                ("eggs", "Eier"),
                ("fish", "Fisch"),
                ("peanuts", "Erdnüsse"),
                ("milk", "Milch"),
                ("nuts", "Schalenfrüchte"),
                ("celery", "Sellerie"),
                ("mustard", "Senf"),
            ]),
        );
        table
    });

/// Lowercase, trimmed, inner whitespace collapsed.
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical allergen name for `name`; unknown names come back normalized.
pub fn canonical_name(name: &str) -> String {
    let key = normalize(name);
    match SYNONYM_TABLE.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => key,
    }
}

/// Icon asset for an allergy name, `None` when unmapped.
pub fn icon_for(name: &str) -> Option<&'static str> {
    ICON_TABLE.get(canonical_name(name).as_str()).copied()
}

/// Deduplicates allergy names that mean the same allergen, keeping
/// first-seen order. A group is listed under its canonical name only when
/// the canonical spelling itself is present; otherwise the first authored
/// spelling is kept as written.
pub fn collapse_allergies<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut groups: Vec<(String, String)> = Vec::new();
    for name in names {
        let authored = name.as_ref().trim();
        if authored.is_empty() {
            continue;
        }
        let key = canonical_name(authored);
        let is_canonical = normalize(authored) == key && ICON_TABLE.contains_key(key.as_str());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, shown)) if is_canonical => *shown = key.clone(),
            Some(_) => {}
            None => {
                let shown = if is_canonical { key.clone() } else { authored.to_string() };
                groups.push((key, shown));
            }
        }
    }
    groups.into_iter().map(|(_, shown)| shown).collect()
}

/// Display label: requested language, default language, then the input.
pub fn allergy_label(name: &str, requested: &str, default: &str) -> String {
    let key = canonical_name(name);
    [requested, default]
        .iter()
        .find_map(|lang| LABELS.get(lang)?.get(key.as_str()).copied())
        .map_or_else(|| name.trim().to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_lookup_ignores_case_and_whitespace() {
        let expected = icon_for("gluten");
        assert!(expected.is_some());
        assert_eq!(icon_for("Gluten "), expected);
        assert_eq!(icon_for(" GLUTEN"), expected);
    }

    #[test]
    fn test_synonyms_share_icon() {
        assert_eq!(icon_for("Soy"), icon_for("soya"));
        assert_eq!(icon_for("dairy"), icon_for("milk"));
        assert_eq!(icon_for("Tree  Nuts"), icon_for("nuts"));
    }

    #[test]
    fn test_unmapped_is_none() {
        assert_eq!(icon_for("kiwi"), None);
        assert_eq!(icon_for(""), None);
    }

    #[test]
    fn test_collapse_soy_soya() {
        assert_eq!(collapse_allergies(&["soy", "soya"]), vec!["soya"]);
        assert_eq!(collapse_allergies(&["soya", "Soy"]), vec!["soya"]);
        assert_eq!(
            collapse_allergies(&["Milk", "gluten", "dairy", " ", "Kiwi"]),
            vec!["milk", "gluten", "Kiwi"]
        );
    }

    #[test]
    fn test_lone_synonym_is_kept_as_authored() {
        assert_eq!(collapse_allergies(&["Dairy"]), vec!["Dairy"]);
        assert_eq!(collapse_allergies(&["dairy", "kiwi", "KIWI"]), vec!["dairy", "kiwi"]);
        assert_eq!(icon_for("Dairy"), icon_for("milk"));
    }

    #[test]
    fn test_allergy_label_fallbacks() {
        assert_eq!(allergy_label(" SOY", "es", "en"), "Soja");
        // German has no lupin label
        assert_eq!(allergy_label("lupin", "de", "en"), "Lupin");
        assert_eq!(allergy_label(" Kiwi ", "fr", "en"), "Kiwi");
    }
}
