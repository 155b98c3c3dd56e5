/*!
 * Integration tests for the translation service against stub provider servers
 */

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wflocale::app_config::{TranslationConfig, TranslationProvider};
use wflocale::content::{ExtractedNode, OverrideText};
use wflocale::errors::{ProviderError, TranslationError};
use wflocale::translation::{NodeTranslator, TranslationService};

fn config_for(provider: TranslationProvider, server: &MockServer, api_key: &str) -> TranslationConfig {
    let mut config = TranslationConfig {
        provider,
        ..TranslationConfig::default()
    };
    config.set_api_key(provider, api_key);
    let name = provider.to_lowercase_string();
    if let Some(provider_config) = config
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == name)
    {
        provider_config.endpoint = server.uri();
        provider_config.timeout_secs = 5;
    }
    config
}

fn nodes() -> Vec<ExtractedNode> {
    vec![ExtractedNode::new(
        "a",
        vec![OverrideText::new("p1", "Hello")],
    )]
}

fn openai_reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 12, "total_tokens": 54}
    })
}

#[tokio::test]
async fn test_translate_withOpenAi_shouldSendPromptAndParseReply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini", "temperature": 0.3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(
            r#"[{"nodeId": "a", "propertyOverrides": [{"propertyId": "p1", "text": "Bonjour"}]}]"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::OpenAI, &server, "sk-test"));
    let translated = service.translate(&nodes(), "fr").await.unwrap();

    assert_eq!(translated.len(), 1);
    assert_eq!(
        translated[0].property_overrides,
        Some(vec![OverrideText::new("p1", "Bonjour")])
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let system = body["messages"][0]["content"].as_str().unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(system.contains("fr (French)"));
    assert!(user.starts_with("Translate this JSON content. Original JSON:\n"));
    assert!(user.contains("\"nodeId\": \"a\""));
}

#[tokio::test]
async fn test_translate_withFencedReply_shouldUnwrapFence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(
            "```json\n[{\"nodeId\": \"a\", \"propertyOverrides\": [{\"propertyId\": \"p1\", \"text\": \"Hallo\"}]}]\n```",
        )))
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::OpenAI, &server, "sk-test"));
    let translated = service.translate(&nodes(), "de").await.unwrap();

    assert_eq!(translated[0].node_id, "a");
}

#[tokio::test]
async fn test_translate_withProseReply_shouldReportMalformedWithRaw() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply("Sorry, I can't help")))
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::OpenAI, &server, "sk-test"));
    let err = service.translate(&nodes(), "fr").await.unwrap_err();

    assert!(matches!(err, TranslationError::MalformedResponse { ref raw, .. } if raw == "Sorry, I can't help"));
}

#[tokio::test]
async fn test_translate_withNullContent_shouldReportEmptyResponse() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        })))
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::OpenAI, &server, "sk-test"));
    let err = service.translate(&nodes(), "fr").await.unwrap_err();

    assert!(matches!(err, TranslationError::EmptyResponse));
}

#[tokio::test]
async fn test_translate_withRejectedKey_shouldWrapAuthenticationError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "Incorrect API key"}})))
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::OpenAI, &server, "sk-bad"));
    let err = service.translate(&nodes(), "fr").await.unwrap_err();

    assert!(matches!(
        err,
        TranslationError::Service(ProviderError::AuthenticationError(ref body)) if body.contains("Incorrect API key")
    ));
}

#[tokio::test]
async fn test_translate_withoutKey_shouldNotContactProvider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::OpenAI, &server, ""));
    let err = service.translate(&nodes(), "fr").await.unwrap_err();

    assert!(matches!(err, TranslationError::MissingCredentials));
}

#[tokio::test]
async fn test_translate_withAnthropic_shouldUseMessagesApi() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "ak-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-haiku-20240307",
            "content": [{
                "type": "text",
                "text": "[{\"nodeId\": \"a\", \"propertyOverrides\": [{\"propertyId\": \"p1\", \"text\": \"Hola\"}]}]"
            }],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 30, "output_tokens": 10}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::Anthropic, &server, "ak-test"));
    assert_eq!(service.provider_name(), "Anthropic");

    let translated = service.translate(&nodes(), "es").await.unwrap();

    assert_eq!(
        translated[0].property_overrides,
        Some(vec![OverrideText::new("p1", "Hola")])
    );
}

#[tokio::test]
async fn test_translate_withLmStudio_shouldWorkWithoutKey() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(
            r#"[{"nodeId": "a"}]"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let service = TranslationService::new(config_for(TranslationProvider::LMStudio, &server, ""));
    assert_eq!(service.provider_name(), "LM Studio");

    let translated = service.translate(&nodes(), "it").await.unwrap();

    assert!(translated[0].property_overrides.is_none());
}
