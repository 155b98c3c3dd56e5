/*!
 * Data model for page content.
 *
 * `Document` and `DomNode` mirror what the DOM endpoint returns. The other
 * types are the flat shapes that travel through translation and back to the
 * write endpoint; their JSON field names match the remote API (`nodeId`,
 * `propertyOverrides`, `propertyId`, `text`).
 */

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw page content tree as returned by the DOM endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Nodes in document order; entries that are not JSON objects are dropped
    #[serde(default, deserialize_with = "deserialize_nodes")]
    pub nodes: Vec<DomNode>,

    /// Remaining top-level fields (pagination, page id, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single node of the DOM document
///
/// `id` and `propertyOverrides` are kept as raw JSON so a node with the wrong
/// shape is skipped during extraction instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomNode {
    /// Node identifier, a string when well-formed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Property overrides attached to a component instance, an array when well-formed
    #[serde(
        rename = "propertyOverrides",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub property_overrides: Option<Value>,

    /// Everything else the API sends for the node (type, text, attributes, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomNode {
    /// The node id, if it is a string
    pub fn node_id(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }

    /// The override entries, if the field is an array
    pub fn overrides(&self) -> Option<&[Value]> {
        self.property_overrides
            .as_ref()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

fn deserialize_nodes<'de, D>(deserializer: D) -> Result<Vec<DomNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<DomNode>(value) {
            Ok(node) => Some(node),
            Err(e) => {
                debug!("Skipping malformed node at index {}: {}", index, e);
                None
            }
        })
        .collect())
}

/// A text value bound to one property slot of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideText {
    /// Property slot identifier, unique within its node
    #[serde(rename = "propertyId")]
    pub property_id: String,

    /// Plain text content
    pub text: String,
}

impl OverrideText {
    pub fn new(property_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            text: text.into(),
        }
    }
}

/// A node that carries at least one translatable override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedNode {
    /// Node identifier from the source document
    #[serde(rename = "nodeId")]
    pub node_id: String,

    /// Overrides in source order
    #[serde(rename = "propertyOverrides")]
    pub property_overrides: Vec<OverrideText>,
}

impl ExtractedNode {
    pub fn new(node_id: impl Into<String>, property_overrides: Vec<OverrideText>) -> Self {
        Self {
            node_id: node_id.into(),
            property_overrides,
        }
    }
}

/// A node as read back from the translation provider
///
/// Same shape as `ExtractedNode`, except that `propertyOverrides` may be
/// missing from the reply. Absence is preserved so the write payload can
/// reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedNode {
    #[serde(rename = "nodeId")]
    pub node_id: String,

    #[serde(
        rename = "propertyOverrides",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub property_overrides: Option<Vec<OverrideText>>,
}

impl From<ExtractedNode> for TranslatedNode {
    fn from(node: ExtractedNode) -> Self {
        Self {
            node_id: node.node_id,
            property_overrides: Some(node.property_overrides),
        }
    }
}

/// Request body of the DOM write endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritePayload {
    pub nodes: Vec<WriteNode>,
}

impl WritePayload {
    /// Number of text fragments carried by the payload
    pub fn fragment_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|n| n.property_overrides.as_ref())
            .map(Vec::len)
            .sum()
    }
}

/// One node of a write payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteNode {
    #[serde(rename = "nodeId")]
    pub node_id: String,

    #[serde(
        rename = "propertyOverrides",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub property_overrides: Option<Vec<OverrideText>>,
}
