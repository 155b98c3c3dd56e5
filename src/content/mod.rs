/*!
 * Page content extraction and reassembly.
 *
 * This module holds the pure half of the workflow:
 *
 * - `model`: Wire types for the DOM document, extracted nodes and write payloads
 * - `extract`: Flattening a DOM document into translatable text fragments
 * - `payload`: Validating translated fragments and rebuilding the write payload
 *
 * Nothing in here performs I/O.
 */

pub mod extract;
pub mod model;
pub mod payload;

pub use self::extract::{count_fragments, extract, extracted_pairs};
pub use self::model::{
    Document, DomNode, ExtractedNode, OverrideText, TranslatedNode, WriteNode, WritePayload,
};
pub use self::payload::{build_write_payload, validate_translation};
