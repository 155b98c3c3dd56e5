/*!
 * Extraction of translatable text from a DOM document.
 */

use log::debug;
use serde_json::Value;

use super::model::{Document, DomNode, ExtractedNode, OverrideText};

/// Flatten a document into the nodes that carry translatable overrides.
///
/// A node is kept when it has at least one override with a string
/// `propertyId` and a `text` field. Node order and override order follow the
/// document.
pub fn extract(document: &Document) -> Vec<ExtractedNode> {
    document.nodes.iter().filter_map(extract_node).collect()
}

fn extract_node(node: &DomNode) -> Option<ExtractedNode> {
    if node.property_overrides.is_none() {
        return None;
    }

    let Some(overrides) = node.overrides() else {
        debug!("Skipping node {:?}: propertyOverrides is not a list", node.id);
        return None;
    };
    if overrides.is_empty() {
        return None;
    }

    let Some(node_id) = node.node_id() else {
        debug!("Skipping node without string id carrying {} override(s)", overrides.len());
        return None;
    };

    let property_overrides: Vec<OverrideText> =
        overrides.iter().filter_map(extract_override).collect();

    if property_overrides.is_empty() {
        return None;
    }

    Some(ExtractedNode::new(node_id, property_overrides))
}

fn extract_override(entry: &Value) -> Option<OverrideText> {
    let property_id = entry.get("propertyId")?.as_str()?;
    let text = entry.get("text").filter(|t| !t.is_null())?;

    Some(OverrideText::new(property_id, unwrap_text(text)))
}

/// Overrides usually carry `{"text": "...", "html": "..."}`; plain strings
/// are accepted as well. Anything else reads as empty text.
fn unwrap_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// All `(nodeId, propertyId)` pairs of an extracted set, in order
pub fn extracted_pairs(nodes: &[ExtractedNode]) -> Vec<(&str, &str)> {
    nodes
        .iter()
        .flat_map(|n| {
            n.property_overrides
                .iter()
                .map(move |o| (n.node_id.as_str(), o.property_id.as_str()))
        })
        .collect()
}

/// Total number of text fragments in an extracted set
pub fn count_fragments(nodes: &[ExtractedNode]) -> usize {
    nodes.iter().map(|n| n.property_overrides.len()).sum()
}
