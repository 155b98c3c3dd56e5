/*!
 * Translation of extracted page content using AI providers.
 *
 * - `core`: The `NodeTranslator` seam and the provider-backed `TranslationService`
 * - `prompts`: System prompt template and user message construction
 * - `response`: Parsing provider replies back into translated nodes
 */

// Re-export main types for easier usage
pub use self::core::{NodeTranslator, TranslationService};
pub use self::prompts::PromptTemplate;
pub use self::response::parse_reply;

// Submodules
pub mod core;
pub mod prompts;
pub mod response;
