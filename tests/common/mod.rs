/*!
 * Common test utilities for the wflocale test suite
 */

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Mutex;
use tempfile::TempDir;

use wflocale::cms::{ContentApi, Locale, LocaleType, PageSummary};
use wflocale::content::{Document, WritePayload};
use wflocale::errors::CmsError;

/// Route library logs to the test output (`RUST_LOG=debug cargo test`)
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Builds a locale
pub fn locale(id: &str, tag: &str, name: &str, kind: LocaleType) -> Locale {
    Locale {
        id: id.to_string(),
        display_name: name.to_string(),
        tag: tag.to_string(),
        kind,
    }
}

/// English primary with French and German secondaries
pub fn sample_locales() -> Vec<Locale> {
    vec![
        locale("l-en", "en", "English", LocaleType::Primary),
        locale("l-fr", "fr", "French", LocaleType::Secondary),
        locale("l-de", "de-DE", "German", LocaleType::Secondary),
    ]
}

/// A page document with two translatable nodes and some noise
pub fn sample_document() -> Document {
    serde_json::from_value(json!({
        "pageId": "page-1",
        "nodes": [
            {
                "id": "hero",
                "type": "component-instance",
                "propertyOverrides": [
                    {"propertyId": "title", "type": "Plain Text", "text": {"text": "Welcome", "html": null}},
                    {"propertyId": "subtitle", "text": "Build faster"}
                ]
            },
            {"id": "image", "type": "image", "image": {"alt": "logo"}},
            {"id": "empty", "propertyOverrides": []},
            {
                "id": "footer",
                "propertyOverrides": [
                    {"propertyId": "note", "text": null},
                    {"propertyId": "copyright", "text": {"text": "All rights reserved"}}
                ]
            }
        ],
        "pagination": {"limit": 100, "offset": 0, "total": 4}
    }))
    .expect("sample document should deserialize")
}

/// Recorded write call
#[derive(Debug, Clone)]
pub struct RecordedWrite {
    pub page_id: String,
    pub locale_id: String,
    pub payload: WritePayload,
}

/// In-memory content platform
///
/// Serves fixed locales, pages and one document; writes are recorded, and
/// fail for locale ids listed in `failing_locales`.
#[derive(Debug, Default)]
pub struct FakeContentApi {
    pub locales: Vec<Locale>,
    pub pages: Vec<PageSummary>,
    pub document: Document,
    pub reject_token: bool,
    pub failing_locales: HashSet<String>,
    pub writes: Mutex<Vec<RecordedWrite>>,
}

impl FakeContentApi {
    pub fn new() -> Self {
        Self {
            locales: sample_locales(),
            pages: vec![
                PageSummary {
                    id: "page-1".to_string(),
                    title: Some("Home".to_string()),
                    slug: Some("index".to_string()),
                },
                PageSummary {
                    id: "page-2".to_string(),
                    title: None,
                    slug: Some("about".to_string()),
                },
            ],
            document: sample_document(),
            ..Self::default()
        }
    }

    /// Make writes for `locale_id` fail with a server error
    pub fn failing_writes_for(mut self, locale_id: &str) -> Self {
        self.failing_locales.insert(locale_id.to_string());
        self
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().expect("writes lock").clone()
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn validate_token(&self) -> Result<(), CmsError> {
        if self.reject_token {
            return Err(CmsError::Unauthorized("sites:read".to_string()));
        }
        Ok(())
    }

    async fn list_pages(&self, _site_id: &str) -> Result<Vec<PageSummary>, CmsError> {
        Ok(self.pages.clone())
    }

    async fn list_locales(&self, _site_id: &str) -> Result<Vec<Locale>, CmsError> {
        Ok(self.locales.clone())
    }

    async fn get_page_dom(&self, page_id: &str) -> Result<Document, CmsError> {
        if self.pages.iter().any(|p| p.id == page_id) {
            Ok(self.document.clone())
        } else {
            Err(CmsError::NotFound(format!("pages/{}/dom", page_id)))
        }
    }

    async fn update_page_dom(
        &self,
        page_id: &str,
        locale_id: &str,
        payload: &WritePayload,
    ) -> Result<(), CmsError> {
        self.writes.lock().expect("writes lock").push(RecordedWrite {
            page_id: page_id.to_string(),
            locale_id: locale_id.to_string(),
            payload: payload.clone(),
        });

        if self.failing_locales.contains(locale_id) {
            return Err(CmsError::Api {
                status_code: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(())
    }
}
