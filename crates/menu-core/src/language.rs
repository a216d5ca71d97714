//! Language codes shared by the publisher and the viewer

/// Language of every canonical field.
pub const DEFAULT_LANGUAGE: &str = "en";

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "es", "fr", "de", "it", "pt", "nl", "zh", "ja"];

pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

/// Lowercases and drops the region part (`fr-CA` -> `fr`, `pt_BR` -> `pt`).
pub fn normalize_language(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("fr-CA"), "fr");
        assert_eq!(normalize_language(" PT_br "), "pt");
        assert_eq!(normalize_language("en"), "en");
        assert_eq!(normalize_language(""), "");
    }

    #[test]
    fn test_default_is_supported() {
        assert!(is_supported(DEFAULT_LANGUAGE));
        assert!(!is_supported("xx"));
    }
}
