use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of a notebook block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Prose, rendered verbatim.
    Text,
    /// Program source, rendered between fence markers.
    Code,
}

/// One ordered unit of notebook content.
///
/// Serialized in the notebook's storage shape:
/// `{"type": "text", "content": "...", "orderingKey": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
    /// Display position. Only this decides output order, never the storage key.
    #[serde(rename = "orderingKey")]
    pub order: usize,
    /// Fields the notebook stores that this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    /// Create a block, trimming its content
    pub fn new(kind: BlockKind, content: impl AsRef<str>, order: usize) -> Self {
        Self {
            kind,
            content: content.as_ref().trim().to_string(),
            order,
            extra: Map::new(),
        }
    }

    pub fn text(content: impl AsRef<str>, order: usize) -> Self {
        Self::new(BlockKind::Text, content, order)
    }

    pub fn code(content: impl AsRef<str>, order: usize) -> Self {
        Self::new(BlockKind::Code, content, order)
    }

    pub fn is_code(&self) -> bool {
        self.kind == BlockKind::Code
    }
}
