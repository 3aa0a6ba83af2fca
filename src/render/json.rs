//! JSON dump of content trees.

use crate::error::Result;
use crate::model::ContentBlock;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a content tree to JSON.
pub fn to_json(content: &ContentBlock, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(content)?,
        JsonFormat::Compact => serde_json::to_string(content)?,
    };
    Ok(json)
}
