/*!
 * Site-level types returned by the Webflow API.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a locale is the site's default or an additional target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocaleType {
    Primary,
    Secondary,
}

impl fmt::Display for LocaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "Primary"),
            Self::Secondary => write!(f, "Secondary"),
        }
    }
}

/// A locale configured on the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Opaque identifier required by the write endpoint
    pub id: String,

    /// Human-readable name
    #[serde(rename = "displayName", default)]
    pub display_name: String,

    /// Language tag passed to the translator (e.g. `fr`, `pt-BR`)
    #[serde(default)]
    pub tag: String,

    /// Primary or secondary
    #[serde(rename = "type")]
    pub kind: LocaleType,
}

impl Locale {
    /// Label used in logs and selection lists, e.g. `French (fr)`
    pub fn label(&self) -> String {
        let name = if self.display_name.is_empty() {
            "Unnamed"
        } else {
            self.display_name.as_str()
        };
        let tag = if self.tag.is_empty() { "No tag" } else { self.tag.as_str() };
        format!("{} ({})", name, tag)
    }
}

/// Locale entry as it appears in the site response, before tagging
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLocale {
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(default)]
    pub tag: String,
}

impl RawLocale {
    pub(crate) fn with_kind(self, kind: LocaleType) -> Locale {
        Locale {
            id: self.id,
            display_name: self.display_name,
            tag: self.tag,
            kind,
        }
    }
}

/// `locales` object of the site response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SiteLocales {
    #[serde(default)]
    pub primary: Option<RawLocale>,
    #[serde(default)]
    pub secondary: Vec<RawLocale>,
}

impl SiteLocales {
    /// Flatten into a single list, primary first
    pub(crate) fn into_locales(self) -> Vec<Locale> {
        self.primary
            .map(|p| p.with_kind(LocaleType::Primary))
            .into_iter()
            .chain(
                self.secondary
                    .into_iter()
                    .map(|s| s.with_kind(LocaleType::Secondary)),
            )
            .collect()
    }
}

/// Site response, only the parts we use
#[derive(Debug, Deserialize)]
pub(crate) struct SiteResponse {
    #[serde(default)]
    pub locales: SiteLocales,
}

/// A page of the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,
}

impl PageSummary {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// Page list response
#[derive(Debug, Deserialize)]
pub(crate) struct PagesResponse {
    #[serde(default)]
    pub pages: Vec<PageSummary>,
}
