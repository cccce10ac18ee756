//! Input document model: the output shape of the upstream block extractor.
//!
//! Loading is deliberately permissive at the field level (missing ids become
//! empty strings, unusable page numbers become page 1) while a non-object
//! root stays fatal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An atomic OCR/extraction line. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub line_id: String,
    pub text: String,
    pub source_page: u32,
}

/// A typed span of document text (e.g. "title", "ingredient", "producer").
/// `block_id` is unique within a document. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub block_id: String,
    pub block_type: String,
    pub text_raw: String,
    pub source_page: u32,
}

/// A complete extracted document, ready for rule evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub lines: Vec<Line>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentError {
    #[error("input document root is not a JSON object")]
    NotAnObject,
}

impl Document {
    /// Builds a document from the block extractor's JSON output, coercing
    /// malformed fields instead of failing the run: absent/odd ids and text
    /// become `""`, unusable page numbers become `1`.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let root = value.as_object().ok_or(DocumentError::NotAnObject)?;

        let lines = items_of(root.get("raw_text_lines"))
            .iter()
            .map(|item| Line {
                line_id: string_field(item, "line_id"),
                text: string_field(item, "text"),
                source_page: page_field(item),
            })
            .collect();

        let blocks = items_of(root.get("blocks"))
            .iter()
            .map(|item| Block {
                block_id: string_field(item, "block_id"),
                block_type: string_field(item, "block_type"),
                text_raw: string_field(item, "text_raw"),
                source_page: page_field(item),
            })
            .collect();

        Ok(Self { lines, blocks })
    }
}

fn items_of(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map_or(&[], Vec::as_slice)
}

fn string_field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// `source_page` coercion: numbers and numeric strings are accepted,
/// everything else (including zero and negatives) falls back to page 1.
fn page_field(item: &Value) -> u32 {
    let parsed = match item.get("source_page") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p > 0 => p as u32,
        _ => 1,
    }
}
