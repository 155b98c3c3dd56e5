/*!
 * Operator session state.
 *
 * A `Session` holds everything one workflow run needs: the credentials and
 * site it targets, the locales and pages fetched from it, and the page
 * currently being viewed with its extracted nodes. It is created at the start
 * of a run, passed explicitly to whatever needs it, and consumed by `finish`.
 */

use anyhow::{Result, anyhow};
use log::{debug, info};
use std::fmt;

use crate::app_config::Config;
use crate::cms::webflow::mask_token;
use crate::cms::{ContentApi, Locale, LocaleType, PageSummary};
use crate::content::{Document, ExtractedNode, count_fragments, extract};
use crate::errors::CmsError;
use crate::language_utils::tags_match;

/// Credentials a session works with
#[derive(Clone, Default)]
pub struct SessionCredentials {
    /// Webflow bearer token
    pub api_token: String,
    /// Site to work on
    pub site_id: String,
}

impl SessionCredentials {
    pub fn new(api_token: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            site_id: site_id.into(),
        }
    }

    /// Take the token and site from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let site_id = config.require_site_id()?;
        if config.webflow.api_token.trim().is_empty() {
            return Err(anyhow!("Webflow API token is required"));
        }
        Ok(Self::new(config.webflow.api_token.trim(), site_id))
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("api_token", &mask_token(&self.api_token))
            .field("site_id", &self.site_id)
            .finish()
    }
}

/// The page currently loaded into a session
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Page identifier
    pub page_id: String,
    /// Raw document as fetched
    pub document: Document,
    /// Translatable nodes extracted from `document`
    pub extracted: Vec<ExtractedNode>,
}

/// State of one operator session
#[derive(Debug, Default)]
pub struct Session {
    credentials: SessionCredentials,
    locales: Vec<Locale>,
    pages: Vec<PageSummary>,
    current: Option<PageContent>,
}

impl Session {
    /// Start a session with the given credentials
    pub fn new(credentials: SessionCredentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    pub fn site_id(&self) -> &str {
        &self.credentials.site_id
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn pages(&self) -> &[PageSummary] {
        &self.pages
    }

    pub fn current_page(&self) -> Option<&PageContent> {
        self.current.as_ref()
    }

    /// Validate the credential and fetch the site's locales and pages
    pub async fn load_site(&mut self, api: &dyn ContentApi) -> Result<(), CmsError> {
        api.validate_token().await?;
        info!("API token validated successfully");

        self.locales = api.list_locales(&self.credentials.site_id).await?;
        self.pages = api.list_pages(&self.credentials.site_id).await?;

        info!(
            "Site {}: {} locale(s), {} page(s)",
            self.credentials.site_id,
            self.locales.len(),
            self.pages.len()
        );
        Ok(())
    }

    /// Fetch a page's document and extract its translatable nodes
    ///
    /// Replaces any previously viewed page.
    pub async fn view_page(
        &mut self,
        api: &dyn ContentApi,
        page_id: &str,
    ) -> Result<&PageContent, CmsError> {
        let document = api.get_page_dom(page_id).await?;
        let extracted = extract(&document);

        debug!(
            "Page {}: {} node(s), {} with overrides, {} text fragment(s)",
            page_id,
            document.nodes.len(),
            extracted.len(),
            count_fragments(&extracted)
        );

        Ok(self.current.insert(PageContent {
            page_id: page_id.to_string(),
            document,
            extracted,
        }))
    }

    /// Resolve operator selectors to site locales
    ///
    /// A selector matches a locale by id, by tag, or by display name
    /// (case-insensitive). Order follows the selectors; a locale selected
    /// twice is kept once. The primary locale may be selected explicitly.
    pub fn select_locales<S: AsRef<str>>(&self, selectors: &[S]) -> Result<Vec<Locale>> {
        let mut selected: Vec<Locale> = Vec::new();

        for selector in selectors {
            let selector = selector.as_ref().trim();
            let locale = self
                .locales
                .iter()
                .find(|l| {
                    l.id == selector
                        || tags_match(&l.tag, selector)
                        || (!l.display_name.is_empty() && l.display_name.eq_ignore_ascii_case(selector))
                })
                .ok_or_else(|| {
                    anyhow!(
                        "Unknown locale '{}'. Available: {}",
                        selector,
                        self.locales
                            .iter()
                            .map(Locale::label)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                })?;

            if !selected.iter().any(|l| l.id == locale.id) {
                selected.push(locale.clone());
            }
        }

        Ok(selected)
    }

    /// All secondary locales, in site order
    pub fn secondary_locales(&self) -> Vec<Locale> {
        self.locales
            .iter()
            .filter(|l| l.kind == LocaleType::Secondary)
            .cloned()
            .collect()
    }

    /// End the session, dropping its credentials and every fetched value
    pub fn finish(self) {
        debug!("Session for site {} finished", self.credentials.site_id);
    }
}
