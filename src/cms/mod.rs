/*!
 * Remote content platform access.
 *
 * The workflow talks to the content platform only through the `ContentApi`
 * trait, so the orchestration can run against the real Webflow client or a
 * test double.
 *
 * - `models`: Locale and page types
 * - `webflow`: reqwest-based Webflow v2 client
 */

use async_trait::async_trait;

use crate::content::{Document, WritePayload};
use crate::errors::CmsError;

pub mod models;
pub mod webflow;

pub use models::{Locale, LocaleType, PageSummary};
pub use webflow::WebflowClient;

/// Read/write operations on the content platform
///
/// Implementations carry their own credential; each method performs exactly
/// one remote call.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Check that the credential is accepted
    async fn validate_token(&self) -> Result<(), CmsError>;

    /// List the site's pages in API order
    async fn list_pages(&self, site_id: &str) -> Result<Vec<PageSummary>, CmsError>;

    /// List the site's locales, primary first
    async fn list_locales(&self, site_id: &str) -> Result<Vec<Locale>, CmsError>;

    /// Fetch a page's DOM document
    async fn get_page_dom(&self, page_id: &str) -> Result<Document, CmsError>;

    /// Replace a page's content for one locale
    async fn update_page_dom(
        &self,
        page_id: &str,
        locale_id: &str,
        payload: &WritePayload,
    ) -> Result<(), CmsError>;
}
