//! Block-document codec.
//!
//! Converts between the flat fenced text a notebook is exported as and the
//! ordered [`Document`](crate::models::Document) model. Code regions sit
//! between pairs of [`CodeFence::MARKER`] lines; everything else is text.

pub mod document;
pub mod fence;

pub use document::{DEFAULT_DOCUMENT_NAME, ParseError, parse_document, render_document};
pub use fence::CodeFence;
