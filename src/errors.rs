/*!
 * Error types for the wflocale application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. Each stage of the
 * page translation workflow (content read, translation, write-back, export)
 * owns its own enum so a failure can be reported with the stage it came from.
 */

use thiserror::Error;

/// Errors that can occur when working with LLM provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors returned by the content platform (Webflow) API
#[derive(Error, Debug)]
pub enum CmsError {
    /// The token is missing, malformed or revoked (HTTP 401)
    #[error("Invalid API token. Please check your token and ensure it has the required permissions ({0})")]
    Unauthorized(String),

    /// The token is valid but lacks the required scope (HTTP 403)
    #[error("API token doesn't have the required permissions. Please ensure it has '{0}' scope")]
    Forbidden(String),

    /// The requested site, page or locale does not exist (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("API Error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Response body returned by the API
        message: String,
    },

    /// The request never produced a response
    #[error("Connection Error: {0}")]
    RequestFailed(String),

    /// The response body did not have the expected shape
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl CmsError {
    /// Whether the failure is caused by the credential rather than the request
    pub fn is_credential_error(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }
}

/// Errors that can occur while translating extracted content
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Nothing was extracted from the page
    #[error("No content to translate")]
    EmptyContent,

    /// No target language tag was given
    #[error("No target language specified")]
    MissingTarget,

    /// The provider requires an API key and none is configured
    #[error("Translation API key is missing")]
    MissingCredentials,

    /// The provider answered without any text
    #[error("Empty response from translation provider")]
    EmptyResponse,

    /// The reply could not be read back as translated nodes
    #[error("Malformed translation response: {detail}")]
    MalformedResponse {
        /// Reply text as received, or the parsed nodes re-serialized when
        /// they were rejected for unknown keys
        raw: String,
        /// Parser or validation diagnostic
        detail: String,
    },

    /// Error from the provider API
    #[error("Provider error: {0}")]
    Service(#[from] ProviderError),
}

/// A write-back call failed for one page/locale pair
#[derive(Error, Debug)]
#[error("Failed to update page {page_id} for locale {locale_id}: {source}")]
pub struct WriteError {
    /// Page that was being written
    pub page_id: String,
    /// Locale that was being written
    pub locale_id: String,
    /// Underlying API failure
    #[source]
    pub source: CmsError,
}

/// Failure of a single locale during a multi-locale run
#[derive(Error, Debug)]
pub enum LocaleError {
    /// Translating (or validating the translation) failed
    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// Writing the translation back failed
    #[error("{0}")]
    Write(#[from] WriteError),
}

/// Errors that can occur while packaging translations for download
#[derive(Error, Debug)]
pub enum ExportError {
    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive encoding failure
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Translated nodes could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
