//! JSON serialization of parsed documents and render trees.

use serde::Serialize;

use crate::error::Result;
use crate::model::Document;

use super::interactive::RenderTree;

/// Output layout for JSON serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Human-readable, indented
    #[default]
    Pretty,

    /// Single-line, minimal
    Compact,
}

/// Serialize a document to JSON.
pub fn to_json(document: &Document, format: JsonFormat) -> Result<String> {
    serialize(document, format)
}

/// Serialize an interactive render tree to JSON.
pub fn tree_to_json(tree: &RenderTree, format: JsonFormat) -> Result<String> {
    serialize(tree, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}
