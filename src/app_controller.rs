use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::app_config::Config;
use crate::cms::{ContentApi, Locale, WebflowClient};
use crate::content::{
    ExtractedNode, TranslatedNode, build_write_payload, count_fragments, validate_translation,
};
use crate::errors::{LocaleError, TranslationError, WriteError};
use crate::session::Session;
use crate::translation::{NodeTranslator, TranslationService};

// @module: Application controller for multi-locale page translation

/// Terminal state of one locale in a run
#[derive(Debug)]
pub enum LocaleOutcome {
    /// Translation was written; carries the number of text fragments sent and
    /// the number extracted from the source
    Written { fragments: usize, expected: usize },
    /// Translation or write-back failed
    Failed(LocaleError),
    /// The run was cancelled before this locale started
    Cancelled,
}

/// Result of one locale in a run
#[derive(Debug)]
pub struct LocaleStatus {
    /// Locale that was processed
    pub locale: Locale,
    /// Validated translation, kept even when the write failed
    pub translated: Option<Vec<TranslatedNode>>,
    /// What happened
    pub outcome: LocaleOutcome,
}

impl LocaleStatus {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LocaleOutcome::Written { .. })
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        match &self.outcome {
            LocaleOutcome::Written { fragments, expected } if fragments < expected => format!(
                "Updated content for {} with only {} of {} text fragment(s)",
                self.locale.label(),
                fragments,
                expected
            ),
            LocaleOutcome::Written { fragments, .. } => format!(
                "Successfully updated content for {} ({} text fragment(s))",
                self.locale.label(),
                fragments
            ),
            LocaleOutcome::Failed(e) => format!("Failed to update content for {}: {}", self.locale.label(), e),
            LocaleOutcome::Cancelled => format!("Skipped {} (cancelled)", self.locale.label()),
        }
    }
}

/// Main application controller for page translation
pub struct Controller {
    // @field: Content platform client
    api: Arc<dyn ContentApi>,
    // @field: Node translator
    translator: Arc<dyn NodeTranslator>,
    // @field: Pause between consecutive write calls
    write_delay: Duration,
    // @field: Set to stop the run between locales
    cancel: Arc<AtomicBool>,
}

impl Controller {
    // @method: Create a controller for a session, using its credentials and the configuration
    pub fn for_session(config: &Config, session: &Session) -> Result<Self> {
        let api = WebflowClient::new(
            session.credentials().api_token.clone(),
            &config.webflow.endpoint,
            config.webflow.timeout_secs,
        )?;
        let translator = TranslationService::new(config.translation.clone());

        Ok(Self::new(
            Arc::new(api),
            Arc::new(translator),
            Duration::from_millis(config.translation.common.write_delay_ms),
        ))
    }

    /// Create a controller from explicit collaborators
    pub fn new(
        api: Arc<dyn ContentApi>,
        translator: Arc<dyn NodeTranslator>,
        write_delay: Duration,
    ) -> Self {
        Self {
            api,
            translator,
            write_delay,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Content platform client used by this controller
    pub fn api(&self) -> &dyn ContentApi {
        self.api.as_ref()
    }

    /// Flag that stops the run before the next locale starts
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Translate and write a page's extracted nodes for each locale, in order.
    ///
    /// Locales are processed one at a time. A failure is recorded against its
    /// locale and the run moves on to the next one.
    pub async fn translate_page(
        &self,
        page_id: &str,
        extracted: &[ExtractedNode],
        locales: &[Locale],
    ) -> Vec<LocaleStatus> {
        let progress_bar = ProgressBar::new(locales.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} locales {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        info!("Translating page {} to {} locale(s)", page_id, locales.len());

        let mut statuses = Vec::with_capacity(locales.len());
        let mut wrote_before = false;

        for (index, locale) in locales.iter().enumerate() {
            if self.is_cancelled() {
                warn!("Run cancelled, skipping {} remaining locale(s)", locales.len() - index);
                statuses.extend(locales[index..].iter().map(|l| LocaleStatus {
                    locale: l.clone(),
                    translated: None,
                    outcome: LocaleOutcome::Cancelled,
                }));
                break;
            }

            progress_bar.set_message(format!("Processing {} ({}/{})", locale.label(), index + 1, locales.len()));

            let status = self.run_locale(page_id, extracted, locale, &mut wrote_before).await;
            match &status.outcome {
                LocaleOutcome::Failed(_) => error!("{}", status.summary()),
                _ => info!("{}", status.summary()),
            }
            statuses.push(status);
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        statuses
    }

    async fn run_locale(
        &self,
        page_id: &str,
        extracted: &[ExtractedNode],
        locale: &Locale,
        wrote_before: &mut bool,
    ) -> LocaleStatus {
        let translated = match self.translate_locale(extracted, locale).await {
            Ok(translated) => translated,
            Err(e) => {
                return LocaleStatus {
                    locale: locale.clone(),
                    translated: None,
                    outcome: LocaleOutcome::Failed(e),
                };
            }
        };

        let payload = build_write_payload(&translated);
        let expected = count_fragments(extracted);
        if payload.fragment_count() < expected {
            warn!(
                "Translation for {} covers {} of {} text fragment(s); the rest keep their current text",
                locale.label(),
                payload.fragment_count(),
                expected
            );
        }

        if *wrote_before && !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }
        *wrote_before = true;

        let outcome = match self.api.update_page_dom(page_id, &locale.id, &payload).await {
            Ok(()) => LocaleOutcome::Written {
                fragments: payload.fragment_count(),
                expected,
            },
            Err(source) => LocaleOutcome::Failed(LocaleError::Write(WriteError {
                page_id: page_id.to_string(),
                locale_id: locale.id.clone(),
                source,
            })),
        };

        LocaleStatus {
            locale: locale.clone(),
            translated: Some(translated),
            outcome,
        }
    }

    async fn translate_locale(
        &self,
        extracted: &[ExtractedNode],
        locale: &Locale,
    ) -> Result<Vec<TranslatedNode>, LocaleError> {
        let translated = self.translator.translate(extracted, &locale.tag).await?;
        validate_translation(extracted, &translated).inspect_err(|e| {
            if let TranslationError::MalformedResponse { raw, detail } = e {
                error!(
                    "Translation for {} rejected: {}\nTranslated content:\n{}",
                    locale.label(),
                    detail,
                    raw
                );
            }
        })?;
        Ok(translated)
    }
}

/// Whether every locale of a run was written
pub fn all_succeeded(statuses: &[LocaleStatus]) -> bool {
    statuses.iter().all(LocaleStatus::is_success)
}
