/*!
 * Reassembly of translated nodes into the write payload.
 */

use std::collections::HashSet;

use crate::errors::TranslationError;

use super::model::{ExtractedNode, TranslatedNode, WriteNode, WritePayload};

/// Build the DOM write body from translated nodes.
///
/// `propertyOverrides` is emitted only for nodes that carried the field; a
/// node without it is written as `{"nodeId": ...}`.
pub fn build_write_payload(translated: &[TranslatedNode]) -> WritePayload {
    let nodes = translated
        .iter()
        .map(|node| WriteNode {
            node_id: node.node_id.clone(),
            property_overrides: node.property_overrides.clone(),
        })
        .collect();

    WritePayload { nodes }
}

/// Check that a translation only refers to keys present in its source.
///
/// Every `(nodeId, propertyId)` pair of `translated` must exist in `source`,
/// and every node id must be known. A reply that invents keys cannot be
/// written back safely and is rejected as malformed.
pub fn validate_translation(
    source: &[ExtractedNode],
    translated: &[TranslatedNode],
) -> Result<(), TranslationError> {
    let known_nodes: HashSet<&str> = source.iter().map(|n| n.node_id.as_str()).collect();
    let known_pairs: HashSet<(&str, &str)> = source
        .iter()
        .flat_map(|n| {
            n.property_overrides
                .iter()
                .map(move |o| (n.node_id.as_str(), o.property_id.as_str()))
        })
        .collect();

    for node in translated {
        if !known_nodes.contains(node.node_id.as_str()) {
            return Err(malformed(
                translated,
                format!("unknown nodeId '{}' in translation", node.node_id),
            ));
        }

        for prop in node.property_overrides.iter().flatten() {
            if !known_pairs.contains(&(node.node_id.as_str(), prop.property_id.as_str())) {
                return Err(malformed(
                    translated,
                    format!(
                        "unknown propertyId '{}' for nodeId '{}' in translation",
                        prop.property_id, node.node_id
                    ),
                ));
            }
        }
    }

    Ok(())
}

fn malformed(translated: &[TranslatedNode], detail: String) -> TranslationError {
    TranslationError::MalformedResponse {
        raw: serde_json::to_string_pretty(translated).unwrap_or_default(),
        detail,
    }
}
