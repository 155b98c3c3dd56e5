/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for chat-style LLM providers:
 * - OpenAI: OpenAI API integration (also used for LM Studio's compatible server)
 * - Anthropic: Anthropic API integration
 * - Mock: Scriptable provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Provider-neutral chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model name
    pub model: String,
    /// System instruction
    pub system: String,
    /// User message
    pub user: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

/// Reply of a chat completion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    /// Reply text, `None` when the provider returned no message content
    pub text: Option<String>,
    /// Input tokens, if reported
    pub prompt_tokens: Option<u64>,
    /// Output tokens, if reported
    pub completion_tokens: Option<u64>,
}

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a chat request
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<ChatReply, ProviderError>` - The reply from the provider or an error
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ProviderError>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}

/// Map an HTTP status and body into a provider error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(body),
        code => ProviderError::ApiError {
            status_code: code,
            message: body,
        },
    }
}

/// Map a reqwest send failure into a provider error
pub(crate) fn send_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

pub mod anthropic;
pub mod mock;
pub mod openai;
