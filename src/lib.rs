/*!
 * # wflocale - Webflow page localization with AI
 *
 * A Rust library for translating the static text of Webflow pages into a
 * site's secondary locales using an LLM, and writing the result back.
 *
 * ## Features
 *
 * - Read a site's locales, pages and page documents through the Webflow v2 API
 * - Extract the translatable text fragments of a page document
 * - Translate them using various AI providers:
 *   - OpenAI API
 *   - Anthropic API
 *   - LM Studio (OpenAI-compatible local server)
 * - Validate a translation against its source before writing it back
 * - Process several locales per page, in order, with per-locale results
 * - Export translations as a ZIP of JSON files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `cms`: Content platform client (`ContentApi` trait, Webflow implementation)
 * - `content`: Document model, extraction and write-back payloads
 * - `translation`: AI-powered translation of extracted nodes:
 *   - `translation::core`: Translation service and the `NodeTranslator` seam
 *   - `translation::prompts`: Prompt rendering
 *   - `translation::response`: Reply parsing
 * - `providers`: Client implementations for various LLM providers
 * - `session`: Per-run state (site, locales, pages, current page)
 * - `app_controller`: Multi-locale orchestration
 * - `export`: ZIP export of translated content
 * - `language_utils`: Locale tag utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod cms;
pub mod content;
pub mod errors;
pub mod export;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, LocaleOutcome, LocaleStatus};
pub use cms::{ContentApi, Locale, LocaleType, PageSummary, WebflowClient};
pub use content::{Document, ExtractedNode, TranslatedNode, WritePayload};
pub use errors::{CmsError, LocaleError, ProviderError, TranslationError, WriteError};
pub use language_utils::{describe_tag, get_language_name, tags_match};
pub use session::Session;
pub use translation::{NodeTranslator, TranslationService};
