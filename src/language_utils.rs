//! Language utilities for locale tag handling
//!
//! Site locales carry BCP-47 style tags (`fr`, `de-DE`, `pt-BR`, `zh-Hans`).
//! These helpers look up the language behind a tag's primary subtag and
//! match operator input against configured tags.

use isolang::Language;

/// Primary language subtag of a tag, lowercased (`pt-BR` -> `pt`)
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Look up the language of a tag's primary subtag (ISO 639-1 or 639-3)
pub fn language_for_tag(tag: &str) -> Option<Language> {
    let primary = primary_subtag(tag);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// English language name for a tag, if known
pub fn get_language_name(tag: &str) -> Option<String> {
    language_for_tag(tag).map(|lang| lang.to_name().to_string())
}

/// Describe a tag for the translator, e.g. `pt-BR (Portuguese)`
///
/// Unknown tags are returned unchanged.
pub fn describe_tag(tag: &str) -> String {
    let tag = tag.trim();
    match get_language_name(tag) {
        Some(name) => format!("{} ({})", tag, name),
        None => tag.to_string(),
    }
}

/// Normalize a tag for comparison: trimmed, lowercase, `_` read as `-`
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_lowercase()
}

/// Check whether two tags name the same locale
pub fn tags_match(tag1: &str, tag2: &str) -> bool {
    let normalized1 = normalize_tag(tag1);
    !normalized1.is_empty() && normalized1 == normalize_tag(tag2)
}
