/*!
 * Prompt construction for page content translation.
 */

use crate::content::ExtractedNode;
use crate::language_utils::describe_tag;

/// Lead-in of the user message; the JSON payload follows on the next line
const USER_MESSAGE_PREFIX: &str = "Translate this JSON content. Original JSON:";

/// System prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with a `{target_language}` placeholder
    template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template for a target tag.
    ///
    /// The tag is kept verbatim; the language name is appended when known so
    /// regional tags such as `pt-BR` are not mistaken for something else.
    pub fn render(&self, target_tag: &str) -> String {
        self.template
            .replace("{target_language}", &describe_tag(target_tag))
    }
}

/// Build the user message carrying the nodes to translate
pub fn user_message(nodes: &[ExtractedNode]) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string_pretty(nodes)?;
    Ok(format!("{}\n{}", USER_MESSAGE_PREFIX, payload))
}
