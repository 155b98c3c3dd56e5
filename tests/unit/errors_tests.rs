/*!
 * Tests for error types and their messages
 */

use std::error::Error;

use wflocale::errors::{
    CmsError, ExportError, LocaleError, ProviderError, TranslationError, WriteError,
};

#[test]
fn test_cmsError_display_shouldNameScopeOrPath() {
    assert!(
        CmsError::Forbidden("pages:write".to_string())
            .to_string()
            .contains("'pages:write' scope")
    );
    assert_eq!(
        CmsError::NotFound("pages/p1/dom".to_string()).to_string(),
        "Resource not found: pages/p1/dom"
    );
    assert_eq!(
        CmsError::Api {
            status_code: 429,
            message: "Too many requests".to_string()
        }
        .to_string(),
        "API Error: 429 - Too many requests"
    );
}

#[test]
fn test_cmsError_isCredentialError_shouldOnlyMatchAuthFailures() {
    assert!(CmsError::Unauthorized("sites:read".to_string()).is_credential_error());
    assert!(CmsError::Forbidden("sites:read".to_string()).is_credential_error());
    assert!(!CmsError::NotFound("sites/x".to_string()).is_credential_error());
    assert!(!CmsError::RequestFailed("timeout".to_string()).is_credential_error());
}

#[test]
fn test_writeError_shouldNamePageLocaleAndCause() {
    let err = WriteError {
        page_id: "page-1".to_string(),
        locale_id: "l-de".to_string(),
        source: CmsError::Api {
            status_code: 500,
            message: "boom".to_string(),
        },
    };

    assert_eq!(
        err.to_string(),
        "Failed to update page page-1 for locale l-de: API Error: 500 - boom"
    );
    assert!(err.source().is_some());
}

#[test]
fn test_localeError_fromTranslationError_shouldWrap() {
    let err: LocaleError = TranslationError::Service(ProviderError::ConnectionError(
        "refused".to_string(),
    ))
    .into();

    assert!(matches!(err, LocaleError::Translation(TranslationError::Service(_))));
    assert_eq!(
        err.to_string(),
        "Translation failed: Provider error: Connection error: refused"
    );
}

#[test]
fn test_malformedResponse_display_shouldShowDetailNotRaw() {
    let err = TranslationError::MalformedResponse {
        raw: "Sorry, I can't help".to_string(),
        detail: "expected value at line 1 column 1".to_string(),
    };

    let message = err.to_string();
    assert!(message.contains("expected value"));
    assert!(!message.contains("Sorry"));
}

#[test]
fn test_exportError_fromIo_shouldKeepMessage() {
    let err: ExportError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
    assert_eq!(err.to_string(), "IO error: read-only");
}
