/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which sends extracted page content to an LLM provider and reads the
 * translated nodes back.
 */

use async_trait::async_trait;
use log::{debug, error, info};
use std::time::Instant;

use super::prompts::{PromptTemplate, user_message};
use super::response::parse_reply;
use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::content::{ExtractedNode, TranslatedNode};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::anthropic::Anthropic;
use crate::providers::openai::OpenAI;
use crate::providers::{ChatRequest, Provider};

/// Anything that can turn extracted nodes into translated nodes
///
/// The orchestration depends on this seam only, so tests can substitute a
/// scripted translator.
#[async_trait]
pub trait NodeTranslator: Send + Sync {
    /// Translate the `text` values of `nodes` into `target_tag`
    async fn translate(
        &self,
        nodes: &[ExtractedNode],
        target_tag: &str,
    ) -> Result<Vec<TranslatedNode>, TranslationError>;
}

/// Main translation service for page content
pub struct TranslationService {
    /// Provider implementation
    provider: Box<dyn Provider>,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Self {
        let timeout_secs = config.get_timeout_secs();

        let provider: Box<dyn Provider> = match config.provider {
            ConfigTranslationProvider::OpenAI => Box::new(OpenAI::new(
                config.get_api_key(),
                config.get_endpoint(),
                timeout_secs,
            )),
            ConfigTranslationProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };

                Box::new(
                    OpenAI::new(api_key, config.get_endpoint(), timeout_secs)
                        .with_label("LM Studio"),
                )
            }
            ConfigTranslationProvider::Anthropic => Box::new(Anthropic::new(
                config.get_api_key(),
                config.get_endpoint(),
                timeout_secs,
            )),
        };

        Self::with_provider(config, provider)
    }

    /// Create a service around an already-built provider
    pub fn with_provider(config: TranslationConfig, provider: Box<dyn Provider>) -> Self {
        Self { provider, config }
    }

    /// Name of the provider in use
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    fn check_preconditions(
        &self,
        nodes: &[ExtractedNode],
        target_tag: &str,
    ) -> Result<(), TranslationError> {
        if nodes.is_empty() {
            return Err(TranslationError::EmptyContent);
        }
        if target_tag.trim().is_empty() {
            return Err(TranslationError::MissingTarget);
        }
        if self.config.provider.requires_api_key() && self.config.get_api_key().trim().is_empty() {
            return Err(TranslationError::MissingCredentials);
        }
        Ok(())
    }

    fn build_request(
        &self,
        nodes: &[ExtractedNode],
        target_tag: &str,
    ) -> Result<ChatRequest, TranslationError> {
        let system = PromptTemplate::new(&self.config.common.system_prompt).render(target_tag);
        let user = user_message(nodes)
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to serialize nodes: {}", e)))?;

        Ok(ChatRequest {
            model: self.config.get_model(),
            system,
            user,
            temperature: self.config.common.temperature,
            max_tokens: self.config.common.max_tokens,
        })
    }
}

#[async_trait]
impl NodeTranslator for TranslationService {
    async fn translate(
        &self,
        nodes: &[ExtractedNode],
        target_tag: &str,
    ) -> Result<Vec<TranslatedNode>, TranslationError> {
        self.check_preconditions(nodes, target_tag)?;

        let request = self.build_request(nodes, target_tag)?;
        debug!("Translation request for {}:\n{}", target_tag, request.user);

        let start_time = Instant::now();
        let reply = self.provider.complete(request).await.map_err(|e| {
            error!("{} translation error: {}", self.provider.name(), e);
            TranslationError::Service(e)
        })?;

        info!(
            "{} response for {} received in {:.1?}",
            self.provider.name(),
            target_tag,
            start_time.elapsed()
        );
        if let (Some(prompt), Some(completion)) = (reply.prompt_tokens, reply.completion_tokens) {
            debug!("Token usage: {} prompt / {} completion", prompt, completion);
        }

        parse_reply(reply.text.as_deref()).inspect_err(|e| {
            if let TranslationError::MalformedResponse { raw, detail } = e {
                error!("JSON parse error: {}\nRaw response content:\n{}", detail, raw);
            }
        })
    }
}
