use crate::models::{Block, BlockKind, Document};

use super::CodeFence;

/// Name given to documents decoded without one (pasted text)
pub const DEFAULT_DOCUMENT_NAME: &str = "Pasted file";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Input is empty")]
    EmptyInput,
    #[error("Unterminated code region: found {fences} fence markers")]
    UnbalancedFence { fences: usize },
}

/// Decode fenced text into a document.
///
/// The input alternates text and code regions: text before the first
/// marker, code between each marker pair, text between a closing marker and
/// the next opening one. Regions that are blank after trimming are dropped,
/// the rest get dense orders from 0 in the order they appear.
pub fn parse_document(text: &str, name: Option<&str>) -> Result<Document, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let fences = CodeFence::positions(text);
    if fences.len() % 2 != 0 {
        return Err(ParseError::UnbalancedFence {
            fences: fences.len(),
        });
    }

    let mut document = Document::new(name.unwrap_or(DEFAULT_DOCUMENT_NAME));
    let Some(&first) = fences.first() else {
        push_segment(&mut document, BlockKind::Text, text);
        return Ok(document);
    };

    push_segment(&mut document, BlockKind::Text, &text[..first]);
    for (pair, fence) in fences.chunks_exact(2).enumerate() {
        let (open, close) = (fence[0], fence[1]);
        push_segment(&mut document, BlockKind::Code, CodeFence::body(text, open, close));

        let next_open = fences.get(2 * pair + 2).copied().unwrap_or(text.len());
        let after_close = close + CodeFence::MARKER.len();
        push_segment(&mut document, BlockKind::Text, &text[after_close..next_open]);
    }

    Ok(document)
}

/// Encode a document as fenced text, blocks in display order separated by a
/// blank line.
pub fn render_document(document: &Document) -> String {
    document
        .ordered_blocks()
        .into_iter()
        .map(|block| match block.kind {
            BlockKind::Code => CodeFence::wrap(block.content.trim()),
            BlockKind::Text => block.content.trim().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Decoded blocks arrive in display order, so key and order are both the
/// number of blocks so far.
fn push_segment(document: &mut Document, kind: BlockKind, segment: &str) {
    if !segment.trim().is_empty() {
        let order = document.blocks.len();
        document
            .blocks
            .insert(order as u64, Block::new(kind, segment, order));
    }
}
