/*!
 * Parsing of translation provider replies.
 *
 * A reply is expected to be the translated node list as JSON. Models
 * sometimes wrap it in a Markdown code fence; a single surrounding fence is
 * removed before parsing, nothing else is repaired.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::TranslatedNode;
use crate::errors::TranslationError;

static CODE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?\s*```\s*$")
        .expect("Invalid code fence regex")
});

/// Remove one Markdown code fence around the reply, if present
pub fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Parse a provider reply into translated nodes
pub fn parse_reply(reply: Option<&str>) -> Result<Vec<TranslatedNode>, TranslationError> {
    let raw = match reply {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(TranslationError::EmptyResponse),
    };

    serde_json::from_str::<Vec<TranslatedNode>>(strip_code_fence(raw)).map_err(|e| {
        TranslationError::MalformedResponse {
            raw: raw.to_string(),
            detail: e.to_string(),
        }
    })
}
