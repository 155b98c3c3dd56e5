/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::echo()` - Returns the submitted JSON unchanged
 * - `MockProvider::raw(text)` - Always returns the given reply text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::failing_for(tag)` - Fails only for one target language
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ChatReply, ChatRequest, Provider};
use crate::errors::ProviderError;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the JSON payload of the user message as-is
    Echo,
    /// Returns a fixed reply
    Raw(&'static str),
    /// Returns no message content
    Empty,
    /// Always fails with an error
    Failing,
    /// Fails when the system instruction mentions the given tag, echoes otherwise
    FailingFor(&'static str),
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests received, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&ChatRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a mock that performs an identity translation
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock that always returns `text`
    pub fn raw(text: &'static str) -> Self {
        Self::new(MockBehavior::Raw(text))
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails for one target tag only
    pub fn failing_for(tag: &'static str) -> Self {
        Self::new(MockBehavior::FailingFor(tag))
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&ChatRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// The JSON part of a translation user message (from the first `[` or `{`)
    pub fn payload_of(request: &ChatRequest) -> &str {
        request
            .user
            .find(['[', '{'])
            .map(|start| &request.user[start..])
            .unwrap_or("")
    }

    fn reply(text: String) -> ChatReply {
        ChatReply {
            text: Some(text),
            prompt_tokens: Some(10),
            completion_tokens: Some(10),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Echo => {
                let text = match self.custom_response {
                    Some(generator) => generator(&request),
                    None => Self::payload_of(&request).to_string(),
                };
                Ok(Self::reply(text))
            }

            MockBehavior::Raw(text) => Ok(Self::reply(text.to_string())),

            MockBehavior::Empty => Ok(ChatReply::default()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::FailingFor(tag) => {
                if request.system.contains(tag) {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated failure for {}", tag),
                        status_code: 503,
                    })
                } else {
                    Ok(Self::reply(Self::payload_of(&request).to_string()))
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}
