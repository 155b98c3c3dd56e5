/*!
 * Tests for application configuration functionality
 */

use std::fs;
use wflocale::app_config::{Config, LogLevel, TranslationProvider};

use crate::common::create_temp_dir;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.translation.get_endpoint(), "https://api.openai.com/v1");
    assert!((config.translation.common.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.translation.common.write_delay_ms, 1000);
    assert!(config.translation.common.system_prompt.contains("{target_language}"));
    assert_eq!(config.webflow.endpoint, "https://api.webflow.com");
    assert_eq!(config.webflow.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);

    let lmstudio = config
        .translation
        .get_provider_config(&TranslationProvider::LMStudio)
        .expect("LM Studio provider config should exist");
    assert_eq!(lmstudio.endpoint, "http://localhost:1234/v1");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Token is required
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("WEBFLOW_API_TOKEN"));

    config.webflow.api_token = "token".to_string();
    assert!(config.validate().is_ok());

    // Prompt must keep its placeholder
    config.translation.common.system_prompt = "Translate everything".to_string();
    assert!(config.validate().is_err());
    config.translation.common.system_prompt = "Translate to {target_language}".to_string();

    // Temperature out of range
    config.translation.common.temperature = 3.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_requireSiteId_withBlankSite_shouldFail() {
    let mut config = Config::default();
    assert!(config.require_site_id().is_err());

    config.webflow.site_id = " site-1 ".to_string();
    assert_eq!(config.require_site_id().unwrap(), "site-1");
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"write_delay_ms\": 1000"));
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(
        &path,
        r#"{
            "webflow": {"api_token": "abc", "site_id": "s1"},
            "translation": {
                "provider": "anthropic",
                "available_providers": [{"type": "anthropic", "api_key": "k"}]
            },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.webflow.api_token, "abc");
    assert_eq!(config.webflow.endpoint, "https://api.webflow.com");
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(config.translation.get_api_key(), "k");
    // Empty model falls back to the provider default
    assert_eq!(config.translation.get_model(), "claude-3-haiku-20240307");
    assert_eq!(config.translation.get_timeout_secs(), 120);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldReportPath() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Config::load_or_create(&path).unwrap_err().to_string();

    assert!(err.contains("Failed to parse config file"));
}

#[test]
fn test_translationProvider_fromStr_shouldAcceptKnownNames() {
    assert_eq!("OpenAI".parse::<TranslationProvider>().unwrap(), TranslationProvider::OpenAI);
    assert_eq!("lmstudio".parse::<TranslationProvider>().unwrap(), TranslationProvider::LMStudio);
    assert!("deepl".parse::<TranslationProvider>().is_err());
    assert!(!TranslationProvider::LMStudio.requires_api_key());
    assert!(TranslationProvider::Anthropic.requires_api_key());
}
