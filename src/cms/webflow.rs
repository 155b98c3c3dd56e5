use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::ContentApi;
use super::models::{Locale, PageSummary, PagesResponse, SiteResponse};
use crate::content::{Document, WritePayload};
use crate::errors::CmsError;

/// Default public API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.webflow.com";

/// Version header required by the DOM endpoints
const DOM_API_VERSION: &str = "1.0.0";

/// Webflow client for the v2 Data API
#[derive(Debug, Clone)]
pub struct WebflowClient {
    /// HTTP client for API requests
    client: Client,
    /// Bearer token
    api_token: String,
    /// Base URL, without the `/v2` prefix
    endpoint: Url,
}

impl WebflowClient {
    /// Create a new client against the given endpoint (empty for the public API)
    pub fn new(
        api_token: impl Into<String>,
        endpoint: &str,
        timeout_secs: u64,
    ) -> Result<Self, CmsError> {
        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint.trim()
        };
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CmsError::RequestFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_token: api_token.into(),
            endpoint,
        })
    }

    fn url(&self, path: &str) -> Result<Url, CmsError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/v2/{}", base, path.trim_start_matches('/')))
            .map_err(|e| CmsError::RequestFailed(format!("Invalid URL for '{}': {}", path, e)))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("accept", "application/json")
            .bearer_auth(&self.api_token)
    }

    async fn send(&self, builder: RequestBuilder, url: &Url) -> Result<Response, CmsError> {
        debug!("{} (authorization: {})", url, mask_token(&self.api_token));
        builder
            .send()
            .await
            .map_err(|e| CmsError::RequestFailed(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        scope: &str,
        dom_version: bool,
    ) -> Result<T, CmsError> {
        let url = self.url(path)?;
        let mut builder = self.authorized(self.client.get(url.clone()));
        if dom_version {
            builder = builder.header("accept-version", DOM_API_VERSION);
        }

        let response = self.send(builder, &url).await?;
        let response = check_status(response, scope, path).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| CmsError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl ContentApi for WebflowClient {
    async fn validate_token(&self) -> Result<(), CmsError> {
        let url = self.url("sites")?;
        let builder = self.authorized(self.client.get(url.clone()));
        let response = self.send(builder, &url).await?;
        check_status(response, "sites:read", "sites").await?;
        Ok(())
    }

    async fn list_pages(&self, site_id: &str) -> Result<Vec<PageSummary>, CmsError> {
        let response: PagesResponse = self
            .get_json(&format!("sites/{}/pages", site_id), "pages:read", false)
            .await?;
        debug!("Fetched {} page(s) for site {}", response.pages.len(), site_id);
        Ok(response.pages)
    }

    async fn list_locales(&self, site_id: &str) -> Result<Vec<Locale>, CmsError> {
        let response: SiteResponse = self
            .get_json(&format!("sites/{}", site_id), "sites:read", false)
            .await?;
        Ok(response.locales.into_locales())
    }

    async fn get_page_dom(&self, page_id: &str) -> Result<Document, CmsError> {
        let document: Document = self
            .get_json(&format!("pages/{}/dom", page_id), "pages:read", true)
            .await?;
        debug!("Fetched DOM for page {} with {} node(s)", page_id, document.nodes.len());
        Ok(document)
    }

    async fn update_page_dom(
        &self,
        page_id: &str,
        locale_id: &str,
        payload: &WritePayload,
    ) -> Result<(), CmsError> {
        let path = format!("pages/{}/dom", page_id);
        let url = self.url(&path)?;
        let builder = self
            .authorized(self.client.post(url.clone()))
            .query(&[("localeId", locale_id)])
            .json(payload);

        debug!(
            "Writing {} node(s) to page {} for locale {}",
            payload.nodes.len(),
            page_id,
            locale_id
        );

        let response = self.send(builder, &url).await?;
        check_status(response, "pages:write", &path).await?;
        Ok(())
    }
}

/// Map a non-success status to the matching error, keeping the body for context
async fn check_status(response: Response, scope: &str, path: &str) -> Result<Response, CmsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    error!("Webflow API error ({}) on {}: {}", status, path, body);

    Err(match status {
        StatusCode::UNAUTHORIZED => CmsError::Unauthorized(scope.to_string()),
        StatusCode::FORBIDDEN => CmsError::Forbidden(scope.to_string()),
        StatusCode::NOT_FOUND => CmsError::NotFound(path.to_string()),
        _ => CmsError::Api {
            status_code: status.as_u16(),
            message: body,
        },
    })
}

/// Render a token for logs, keeping only the last four characters
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("Bearer ****{}", tail)
}
