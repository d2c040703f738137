//! Tabular import codec.
//!
//! Turns delimited text (or a JSON document) into a variable declaration
//! that can be dropped into a notebook as a single code block:
//!
//! 1. [`split_row`] tokenizes one row, honouring quotes and escapes.
//! 2. [`parse_table`] builds a rectangular [`Table`] of [`Cell`]s.
//! 3. [`Table::to_value`] shapes it row-major or column-major.
//! 4. [`render_declaration`] wraps the literal as `name = literal;`.
//!
//! [`convert_source`] runs the whole pipeline for one file.

mod cursor;
pub mod declaration;
pub mod table;
pub mod tokenize;

use serde::{Deserialize, Serialize};

pub use declaration::{declaration_identifier, is_json_source, render_declaration};
pub use table::{Cell, ColumnKey, Table, parse_table};
pub use tokenize::{is_valid_separator, split_row};

#[derive(Debug, thiserror::Error)]
pub enum TabularError {
    #[error("Input is empty")]
    EmptyInput,
    #[error("Row {row} is not valid delimited text")]
    RowTokenizeFailure { row: usize },
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0:?} cannot be used as a separator")]
    InvalidSeparator(char),
}

/// Whether the rendered literal is organised by row or by column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// An array of records, one per row
    #[default]
    Row,
    /// An object of arrays, one per column
    Column,
}

/// Caller-chosen settings for one table conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub separator: char,
    /// The first row names the columns rather than holding data.
    pub has_headers: bool,
    /// Key records by header name instead of column index. Ignored without headers.
    pub use_header_names: bool,
    pub orientation: Orientation,
    /// Render a one-column table as a flat array.
    pub simplify_single_column: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            has_headers: true,
            use_header_names: true,
            orientation: Orientation::Row,
            simplify_single_column: false,
        }
    }
}

impl TableOptions {
    /// Header names are only usable when there is a header row
    pub fn keys_from_headers(&self) -> bool {
        self.has_headers && self.use_header_names
    }

    pub fn validate(&self) -> Result<(), TabularError> {
        if is_valid_separator(self.separator) {
            Ok(())
        } else {
            Err(TabularError::InvalidSeparator(self.separator))
        }
    }
}

/// Convert one source file's content into a declaration.
///
/// `.json` files are checked for validity and embedded verbatim; anything
/// else is parsed as delimited text with `options`.
pub fn convert_source(
    file_name: &str,
    text: &str,
    options: &TableOptions,
) -> Result<String, TabularError> {
    let identifier = declaration_identifier(file_name);

    let literal = if is_json_source(file_name) {
        let raw = text.trim();
        if raw.is_empty() {
            return Err(TabularError::EmptyInput);
        }
        serde_json::from_str::<serde_json::Value>(raw)?;
        raw.to_string()
    } else {
        let table = parse_table(text, options)?;
        let value = table.to_value(options.orientation, options.simplify_single_column);
        format!("{value:#}")
    };

    Ok(render_declaration(&identifier, &literal))
}
